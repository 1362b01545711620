//! bcrypt password hashing.
//!
//! bcrypt is the Blowfish-based adaptive hash behind `$2b$` strings, as issued
//! by `gensalt()`-style tooling. Hashes are emitted in the `$2b$` revision;
//! verification accepts `$2a$`, `$2x$` and `$2y$` as well.
//!
//! bcrypt only looks at the first 72 bytes of its input and treats NUL as a
//! terminator. Rather than silently truncating, plaintexts that would be
//! altered are rejected up front so two different plaintexts can never
//! share a hash.
//!
//! ## Examples
//!
//! ```rust
//! use hashpass_lib::blowfish::{hash_bcrypt, verify_bcrypt};
//!
//! let hash = hash_bcrypt("my-secret-password", 4).unwrap();
//! assert!(hash.starts_with("$2b$04$"));
//! assert!(verify_bcrypt("my-secret-password", &hash).unwrap());
//! assert!(!verify_bcrypt("wrong-password", &hash).unwrap());
//! ```

use bcrypt::{BcryptError, Version};

use crate::config::validate_bcrypt_cost;
use crate::error::HashError;

/// Longest plaintext bcrypt hashes without truncation.
pub const MAX_BCRYPT_INPUT_LEN: usize = 72;

/// Hashes a plaintext with bcrypt at the given cost, using a random salt.
///
/// ## Errors
///
/// Returns `HashError::Configuration` if the cost is outside 4..=31.
/// Returns `HashError::Encoding` if the plaintext is longer than 72 bytes
/// or contains a NUL byte.
pub fn hash_bcrypt(plaintext: &str, cost: u32) -> Result<String, HashError> {
    validate_bcrypt_cost(cost)?;
    check_bcrypt_input(plaintext.as_bytes())?;

    bcrypt::hash(plaintext.as_bytes(), cost).map_err(map_bcrypt_error)
}

/// Hashes a plaintext with a caller-provided 16 byte salt.
///
/// ## Warning
///
/// In production, prefer [`hash_bcrypt`] which draws a fresh salt from the
/// OS. This exists for deterministic tests and migrations.
///
/// ## Errors
///
/// Same as [`hash_bcrypt`].
pub fn hash_bcrypt_with_salt(
    plaintext: &str,
    cost: u32,
    salt: [u8; 16],
) -> Result<String, HashError> {
    validate_bcrypt_cost(cost)?;
    check_bcrypt_input(plaintext.as_bytes())?;

    bcrypt::hash_with_salt(plaintext.as_bytes(), cost, salt)
        .map(|parts| parts.format_for_version(Version::TwoB))
        .map_err(map_bcrypt_error)
}

/// Verifies a plaintext against a bcrypt hash.
///
/// A plaintext that bcrypt cannot represent never matches.
///
/// ## Errors
///
/// Returns `HashError::InvalidHash` if the hash cannot be decoded.
pub fn verify_bcrypt(plaintext: &str, encoded: &str) -> Result<bool, HashError> {
    if check_bcrypt_input(plaintext.as_bytes()).is_err() {
        // still decode the hash so malformed input is reported consistently
        bcrypt::verify(b"", encoded).map_err(map_bcrypt_error)?;
        return Ok(false);
    }

    bcrypt::verify(plaintext.as_bytes(), encoded).map_err(map_bcrypt_error)
}

fn check_bcrypt_input(bytes: &[u8]) -> Result<(), HashError> {
    if bytes.len() > MAX_BCRYPT_INPUT_LEN {
        return Err(HashError::Encoding(format!(
            "plaintext is {} bytes; bcrypt accepts at most {MAX_BCRYPT_INPUT_LEN}",
            bytes.len()
        )));
    }
    if let Some(position) = bytes.iter().position(|&b| b == 0) {
        return Err(HashError::Encoding(format!(
            "plaintext contains a NUL byte at offset {position}"
        )));
    }
    Ok(())
}

fn map_bcrypt_error(err: BcryptError) -> HashError {
    match err {
        BcryptError::CostNotAllowed(cost) => {
            HashError::Configuration(format!("bcrypt cost {cost} is not allowed"))
        }
        BcryptError::InvalidCost(_)
        | BcryptError::InvalidPrefix(_)
        | BcryptError::InvalidHash(_)
        | BcryptError::InvalidSaltLen(_)
        | BcryptError::InvalidBase64(_) => HashError::InvalidHash(err.to_string()),
        other => HashError::Hashing(other.to_string()),
    }
}
