//! The password hasher: one configured entry point over both schemes.

use std::time::Instant;

use tracing::{debug, warn};

use crate::argon::{hash_argon2id, verify_argon2};
use crate::blowfish::{hash_bcrypt, verify_bcrypt};
use crate::config::HasherConfig;
use crate::error::HashError;
use crate::plaintext::Plaintext;
use crate::scheme::{EncodedHash, HashScheme};

/// Issues and checks encoded hashes under a validated [`HasherConfig`].
///
/// ## Examples
///
/// ```rust
/// use hashpass_lib::{HasherConfig, PasswordHasher, Plaintext};
///
/// let hasher = PasswordHasher::new(HasherConfig::default().with_bcrypt_cost(4)).unwrap();
/// let plaintext = Plaintext::new("Admin123");
///
/// let hash = hasher.hash(&plaintext).unwrap();
/// assert_eq!(hash.bcrypt_cost(), Some(4));
/// assert!(hasher.verify(&plaintext, hash.as_str()).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    config: HasherConfig,
}

impl PasswordHasher {
    /// Creates a hasher, validating the configuration up front.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::Configuration` if the selected scheme's cost
    /// parameters are out of range.
    pub fn new(config: HasherConfig) -> Result<Self, HashError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Hashes a plaintext with a fresh random salt.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::Encoding` if the scheme cannot represent the
    /// plaintext, or `HashError::Hashing` if the backend fails.
    pub fn hash(&self, plaintext: &Plaintext) -> Result<EncodedHash, HashError> {
        let started = Instant::now();
        let scheme = self.config.scheme;

        let encoded = match scheme {
            HashScheme::Bcrypt => hash_bcrypt(plaintext.as_str(), self.config.bcrypt_cost)?,
            HashScheme::Argon2id => hash_argon2id(plaintext.as_str(), &self.config.argon2)?,
        };

        match scheme {
            HashScheme::Bcrypt => debug!(
                scheme = %scheme,
                cost = self.config.bcrypt_cost,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "hashed password"
            ),
            HashScheme::Argon2id => debug!(
                scheme = %scheme,
                memory_cost_kib = self.config.argon2.memory_cost_kib,
                time_cost = self.config.argon2.time_cost,
                parallelism = self.config.argon2.parallelism,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "hashed password"
            ),
        }

        Ok(EncodedHash::from_backend(scheme, encoded))
    }

    /// Verifies a plaintext against an encoded hash.
    ///
    /// The scheme is taken from the encoded hash, not from this hasher's
    /// configuration, so hashes issued under other settings still verify.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::InvalidHash` if the encoded hash is malformed or
    /// uses an unknown scheme.
    pub fn verify(&self, plaintext: &Plaintext, encoded: &str) -> Result<bool, HashError> {
        verify_encoded(plaintext, encoded)
    }
}

fn verify_encoded(plaintext: &Plaintext, encoded: &str) -> Result<bool, HashError> {
    let started = Instant::now();
    let Some(scheme) = HashScheme::detect(encoded) else {
        warn!("refusing to verify against an unrecognised hash scheme");
        return Err(HashError::InvalidHash(
            "unrecognised hash scheme prefix".into(),
        ));
    };

    let matched = match scheme {
        HashScheme::Bcrypt => verify_bcrypt(plaintext.as_str(), encoded)?,
        HashScheme::Argon2id => verify_argon2(plaintext.as_str(), encoded)?,
    };

    debug!(
        scheme = %scheme,
        matched,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "verified password"
    );
    Ok(matched)
}

/// Hashes a password with the default configuration (bcrypt, cost 12).
///
/// ```rust
/// use hashpass_lib::{hash_password, verify_password};
///
/// let hash = hash_password("Admin123").unwrap();
/// assert!(hash.starts_with("$2b$12$"));
/// assert!(verify_password("Admin123", &hash).unwrap());
/// ```
///
/// ## Errors
///
/// Returns `HashError::Encoding` if bcrypt cannot represent the plaintext.
pub fn hash_password(plaintext: &str) -> Result<String, HashError> {
    PasswordHasher::default()
        .hash(&Plaintext::new(plaintext))
        .map(EncodedHash::into_string)
}

/// Verifies a password against any supported encoded hash.
///
/// ## Errors
///
/// Returns `HashError::InvalidHash` if the hash format is invalid.
pub fn verify_password(plaintext: &str, encoded: &str) -> Result<bool, HashError> {
    verify_encoded(&Plaintext::new(plaintext), encoded)
}
