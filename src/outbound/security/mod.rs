//! Password hashing adapter built on bcrypt.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Bcrypt-backed [`PasswordHasher`].
///
/// The work factor defaults to the crate's recommended cost. Tests drop it
/// to the minimum so suites that register users stay fast.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Use an explicit work factor. Bcrypt rejects costs outside 4..=31 at
    /// hashing time.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError> {
        hash(plaintext, self.cost).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError> {
        verify(plaintext, hash).map_err(|err| PasswordHashError::verify(err.to_string()))
    }
}
