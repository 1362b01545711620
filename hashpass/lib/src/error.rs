//! Error types for the password hasher.

use thiserror::Error;

/// Errors that can occur while hashing or verifying a password.
#[derive(Debug, Error)]
pub enum HashError {
    /// The plaintext cannot be represented in the encoding the scheme expects.
    #[error("plaintext encoding error: {0}")]
    Encoding(String),

    /// A cost or work-factor parameter is outside the supported range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The encoded hash is malformed or uses an unknown scheme.
    #[error("invalid password hash format: {0}")]
    InvalidHash(String),

    /// The hashing backend failed for some other reason.
    #[error("failed to hash password: {0}")]
    Hashing(String),
}
