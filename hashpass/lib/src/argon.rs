//! Argon2id password hashing.
//!
//! Argon2id is offered next to bcrypt for deployments that want a
//! memory-hard scheme. Output is a PHC string carrying the algorithm,
//! version, parameters, salt and digest, so [`verify_argon2`] needs nothing
//! but the string itself.
//!
//! ## Examples
//!
//! ```rust
//! use hashpass_lib::Argon2Settings;
//! use hashpass_lib::argon::{hash_argon2id, verify_argon2};
//!
//! // Small parameters keep the example fast
//! let settings = Argon2Settings::new(4096, 1, 1);
//! let hash = hash_argon2id("my-secret-password", &settings).unwrap();
//!
//! assert!(hash.starts_with("$argon2id$"));
//! assert!(verify_argon2("my-secret-password", &hash).unwrap());
//! assert!(!verify_argon2("wrong-password", &hash).unwrap());
//! ```

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

use crate::config::{Argon2Settings, MAX_MEMORY_COST_KIB};
use crate::error::HashError;

/// Hashes a plaintext with Argon2id and a random salt.
///
/// ## Errors
///
/// Returns `HashError::Configuration` if the settings are invalid.
/// Returns `HashError::Hashing` if hashing fails.
pub fn hash_argon2id(plaintext: &str, settings: &Argon2Settings) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    hash_with(plaintext, settings, &salt)
}

/// Hashes a plaintext with a provided salt (for tests or migrations).
///
/// ## Warning
///
/// In production, prefer [`hash_argon2id`] which generates a
/// cryptographically secure random salt.
///
/// ## Errors
///
/// Returns `HashError::Configuration` if the salt or settings are invalid.
/// Returns `HashError::Hashing` if hashing fails.
pub fn hash_argon2id_with_salt(
    plaintext: &str,
    settings: &Argon2Settings,
    salt: &str,
) -> Result<String, HashError> {
    let salt = SaltString::encode_b64(salt.as_bytes())
        .map_err(|e| HashError::Configuration(format!("argon2id salt: {e}")))?;
    hash_with(plaintext, settings, &salt)
}

/// Verifies a plaintext against an Argon2 PHC string.
///
/// The algorithm variant and parameters are read from the hash itself.
/// Hashes asking for more than [`MAX_MEMORY_COST_KIB`], or for more memory
/// than can be reserved, are rejected before any hashing work starts.
///
/// ## Errors
///
/// Returns `HashError::InvalidHash` if the hash format or its parameters
/// are invalid.
pub fn verify_argon2(plaintext: &str, encoded: &str) -> Result<bool, HashError> {
    let parsed_hash =
        PasswordHash::new(encoded).map_err(|e| HashError::InvalidHash(e.to_string()))?;
    let params =
        Params::try_from(&parsed_hash).map_err(|e| HashError::InvalidHash(e.to_string()))?;

    if params.m_cost() > MAX_MEMORY_COST_KIB {
        return Err(HashError::InvalidHash(format!(
            "memory cost {} KiB exceeds the {MAX_MEMORY_COST_KIB} KiB limit",
            params.m_cost()
        )));
    }
    reserve_memory(params.m_cost()).map_err(HashError::InvalidHash)?;

    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed_hash)
        .is_ok())
}

fn hash_with(
    plaintext: &str,
    settings: &Argon2Settings,
    salt: &SaltString,
) -> Result<String, HashError> {
    let params = settings.to_params()?;
    reserve_memory(params.m_cost()).map_err(HashError::Configuration)?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    argon2
        .hash_password(plaintext.as_bytes(), salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashError::Hashing(e.to_string()))
}

/// Checks that the allocator can hand out `memory_cost_kib` KiB.
///
/// argon2 allocates its block matrix infallibly, so a request the system
/// cannot satisfy aborts the process. Reserving (without touching) the same
/// amount first turns that into an error.
fn reserve_memory(memory_cost_kib: u32) -> Result<(), String> {
    let bytes = usize::try_from(memory_cost_kib)
        .ok()
        .and_then(|kib| kib.checked_mul(1024))
        .ok_or_else(|| format!("memory cost {memory_cost_kib} KiB is not addressable"))?;

    let mut blocks: Vec<u8> = Vec::new();
    blocks
        .try_reserve_exact(bytes)
        .map_err(|_| format!("unable to reserve {memory_cost_kib} KiB for argon2"))
}
