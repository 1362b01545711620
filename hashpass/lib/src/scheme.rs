//! Hash schemes and the self-describing encoded hash string.

use std::fmt;

use crate::error::HashError;

/// Prefixes of the bcrypt revisions we can verify.
const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

/// Prefixes of the Argon2 variants we can verify.
const ARGON2_PREFIXES: [&str; 3] = ["$argon2id$", "$argon2i$", "$argon2d$"];

/// Length of a bcrypt encoded hash (`$2b$12$` + 22 salt + 31 digest chars).
pub const BCRYPT_ENCODED_LEN: usize = 60;

/// The adaptive hash family an encoded hash belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashScheme {
    /// bcrypt, `$2b$` hashes at cost 12 by default.
    #[default]
    Bcrypt,
    /// Argon2id, emitted as a PHC string. Verification also accepts Argon2i/Argon2d.
    Argon2id,
}

impl HashScheme {
    /// Detects the scheme from an encoded hash's prefix.
    ///
    /// ```rust
    /// use hashpass_lib::HashScheme;
    ///
    /// assert_eq!(HashScheme::detect("$2y$10$abc"), Some(HashScheme::Bcrypt));
    /// assert_eq!(HashScheme::detect("$argon2id$v=19$"), Some(HashScheme::Argon2id));
    /// assert_eq!(HashScheme::detect("md5:abc"), None);
    /// ```
    pub fn detect(encoded: &str) -> Option<Self> {
        if BCRYPT_PREFIXES.iter().any(|p| encoded.starts_with(p)) {
            Some(Self::Bcrypt)
        } else if ARGON2_PREFIXES.iter().any(|p| encoded.starts_with(p)) {
            Some(Self::Argon2id)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bcrypt => "bcrypt",
            Self::Argon2id => "argon2id",
        }
    }
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An encoded hash bundling algorithm, cost, salt and digest.
///
/// Only the outer shape is checked on [`parse`](Self::parse); the backend
/// does full decoding during verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    scheme: HashScheme,
    value: String,
}

impl EncodedHash {
    /// Parses an encoded hash string, detecting its scheme.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::InvalidHash` for an unknown prefix or a bcrypt
    /// string of the wrong length.
    pub fn parse(encoded: &str) -> Result<Self, HashError> {
        let scheme = HashScheme::detect(encoded).ok_or_else(|| {
            HashError::InvalidHash("unrecognised hash scheme prefix".into())
        })?;

        if scheme == HashScheme::Bcrypt {
            if encoded.len() != BCRYPT_ENCODED_LEN {
                return Err(HashError::InvalidHash(format!(
                    "bcrypt hash must be {BCRYPT_ENCODED_LEN} characters, got {}",
                    encoded.len()
                )));
            }
            if parse_bcrypt_cost(encoded).is_none() {
                return Err(HashError::InvalidHash("bcrypt cost is not numeric".into()));
            }
        }

        Ok(Self {
            scheme,
            value: encoded.to_owned(),
        })
    }

    /// Wraps a string produced by one of our backends.
    pub(crate) fn from_backend(scheme: HashScheme, value: String) -> Self {
        Self { scheme, value }
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// The bcrypt cost factor embedded in the hash, if this is a bcrypt hash.
    pub fn bcrypt_cost(&self) -> Option<u32> {
        match self.scheme {
            HashScheme::Bcrypt => parse_bcrypt_cost(&self.value),
            HashScheme::Argon2id => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for EncodedHash {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// `$2b$12$...` -> 12
fn parse_bcrypt_cost(encoded: &str) -> Option<u32> {
    encoded.get(4..6)?.parse().ok()
}
