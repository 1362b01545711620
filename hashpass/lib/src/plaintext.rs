//! The plaintext credential handed to the hasher.
//!
//! A [`Plaintext`] always holds valid UTF-8. Raw bytes and OS strings are
//! checked on the way in, so encoding problems surface as
//! [`HashError::Encoding`] before any hashing work starts. The buffer is
//! zeroized when the value is dropped.

use std::ffi::OsString;
use std::fmt;

use zeroize::Zeroizing;

use crate::error::HashError;

/// The credential hashed when no plaintext is supplied.
pub const DEFAULT_PLAINTEXT: &str = "Admin123";

/// An in-memory plaintext credential.
#[derive(Clone)]
pub struct Plaintext(Zeroizing<String>);

impl Plaintext {
    /// Wraps a string slice.
    pub fn new(text: &str) -> Self {
        Self(Zeroizing::new(text.to_owned()))
    }

    /// Builds a plaintext from raw bytes.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::Encoding` if the bytes are not valid UTF-8.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, HashError> {
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Self(Zeroizing::new(text))),
            Err(err) => {
                let position = err.utf8_error().valid_up_to();
                // the rejected buffer still holds the secret
                let _ = Zeroizing::new(err.into_bytes());
                Err(HashError::Encoding(format!(
                    "plaintext is not valid UTF-8 (invalid byte at offset {position})"
                )))
            }
        }
    }

    /// Builds a plaintext from an OS string, as received on the command line.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::Encoding` if the OS string is not valid UTF-8.
    pub fn from_os_string(value: OsString) -> Result<Self, HashError> {
        value
            .into_string()
            .map(|text| Self(Zeroizing::new(text)))
            .map_err(|rejected| {
                let _ = Zeroizing::new(rejected.into_encoded_bytes());
                HashError::Encoding("plaintext argument is not valid UTF-8".into())
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Plaintext {
    fn default() -> Self {
        Self::new(DEFAULT_PLAINTEXT)
    }
}

impl From<&str> for Plaintext {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Plaintext").field(&"<redacted>").finish()
    }
}
