//! Salted, adaptive password hashing.
//!
//! This crate hashes a plaintext credential into a self-describing encoded
//! hash and verifies plaintexts against such hashes. Two schemes are
//! supported:
//!
//! - **bcrypt** (default): `$2b$<cost>$<salt><digest>`, cost 12 by default
//! - **Argon2id**: PHC string `$argon2id$v=19$m=..,t=..,p=..$<salt>$<hash>`
//!
//! Every hash draws a fresh salt from the operating system, so hashing the
//! same plaintext twice yields two different strings that both verify.
//!
//! ## Core Types
//!
//! - [`PasswordHasher`] - Hashes and verifies under a validated [`HasherConfig`]
//! - [`Plaintext`] - UTF-8 checked, zeroize-on-drop credential
//! - [`EncodedHash`] - An issued hash with its detected [`HashScheme`]
//! - [`HashError`] - Encoding, configuration, invalid-hash and backend failures
//!
//! ## Examples
//!
//! ```rust
//! use hashpass_lib::{hash_password, verify_password};
//!
//! let hash = hash_password("Admin123").unwrap();
//! assert!(verify_password("Admin123", &hash).unwrap());
//! assert!(!verify_password("admin123", &hash).unwrap());
//! ```

pub mod argon;
pub mod blowfish;
mod config;
mod error;
mod hasher;
mod plaintext;
mod scheme;

pub use config::{
    Argon2Settings, DEFAULT_BCRYPT_COST, DEFAULT_MEMORY_COST_KIB, DEFAULT_OUTPUT_LEN,
    DEFAULT_PARALLELISM, DEFAULT_TIME_COST, HasherConfig, MAX_BCRYPT_COST, MAX_MEMORY_COST_KIB,
    MIN_BCRYPT_COST,
};
pub use error::HashError;
pub use hasher::{PasswordHasher, hash_password, verify_password};
pub use plaintext::{DEFAULT_PLAINTEXT, Plaintext};
pub use scheme::{BCRYPT_ENCODED_LEN, EncodedHash, HashScheme};
