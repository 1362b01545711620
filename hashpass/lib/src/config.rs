//! Hasher configuration: which scheme to use and at what cost.
//!
//! Defaults follow the libraries: bcrypt cost 12 (the same as `gensalt()`
//! in common bcrypt tooling) and the OWASP-recommended Argon2id parameters.

use argon2::Params;

use crate::error::HashError;
use crate::scheme::HashScheme;

/// Default bcrypt cost factor (2^12 rounds).
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// Lowest bcrypt cost the algorithm accepts.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest bcrypt cost the algorithm accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Default memory cost in KiB (19 MiB - OWASP recommended minimum).
pub const DEFAULT_MEMORY_COST_KIB: u32 = 19456;

/// Largest memory cost accepted for hashing or verification (4 GiB).
pub const MAX_MEMORY_COST_KIB: u32 = 4 * 1024 * 1024;

/// Default time cost (number of iterations).
pub const DEFAULT_TIME_COST: u32 = 2;

/// Default parallelism (number of lanes).
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Default output length in bytes.
pub const DEFAULT_OUTPUT_LEN: usize = 32;

/// Argon2id work-factor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Settings {
    pub memory_cost_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Argon2Settings {
    pub fn new(memory_cost_kib: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost_kib,
            time_cost,
            parallelism,
        }
    }

    /// Converts to `argon2::Params`, rejecting values Argon2 does not support.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::Configuration` if any parameter is out of range.
    pub fn to_params(&self) -> Result<Params, HashError> {
        if self.memory_cost_kib > MAX_MEMORY_COST_KIB {
            return Err(HashError::Configuration(format!(
                "argon2id parameters: memory cost {} KiB exceeds the {MAX_MEMORY_COST_KIB} KiB limit",
                self.memory_cost_kib
            )));
        }

        Params::new(
            self.memory_cost_kib,
            self.time_cost,
            self.parallelism,
            Some(DEFAULT_OUTPUT_LEN),
        )
        .map_err(|e| HashError::Configuration(format!("argon2id parameters: {e}")))
    }
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_COST_KIB, DEFAULT_TIME_COST, DEFAULT_PARALLELISM)
    }
}

/// Everything a [`PasswordHasher`](crate::PasswordHasher) needs to issue hashes.
///
/// Only the settings of the selected scheme are validated; the other
/// scheme's settings are carried along unused.
///
/// ```rust
/// use hashpass_lib::{HashScheme, HasherConfig};
///
/// let config = HasherConfig::default().with_bcrypt_cost(10);
/// assert_eq!(config.scheme, HashScheme::Bcrypt);
/// assert!(config.validate().is_ok());
///
/// assert!(HasherConfig::default().with_bcrypt_cost(40).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherConfig {
    pub scheme: HashScheme,
    pub bcrypt_cost: u32,
    pub argon2: Argon2Settings,
}

impl HasherConfig {
    pub fn with_scheme(mut self, scheme: HashScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_argon2(mut self, settings: Argon2Settings) -> Self {
        self.argon2 = settings;
        self
    }

    /// Checks the selected scheme's parameters.
    ///
    /// ## Errors
    ///
    /// Returns `HashError::Configuration` if the cost is out of range.
    pub fn validate(&self) -> Result<(), HashError> {
        match self.scheme {
            HashScheme::Bcrypt => validate_bcrypt_cost(self.bcrypt_cost),
            HashScheme::Argon2id => self.argon2.to_params().map(|_| ()),
        }
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            scheme: HashScheme::Bcrypt,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            argon2: Argon2Settings::default(),
        }
    }
}

pub(crate) fn validate_bcrypt_cost(cost: u32) -> Result<(), HashError> {
    if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        Ok(())
    } else {
        Err(HashError::Configuration(format!(
            "bcrypt cost {cost} is outside the supported range {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}"
        )))
    }
}
