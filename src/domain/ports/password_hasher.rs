//! Port abstraction for password hashing adapters.

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing the plaintext failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed or compared.
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// Salted, deliberately slow password hashing.
///
/// Hashing is CPU-bound and synchronous. The salt is generated per hash and
/// embedded in the encoded output, so `verify` needs no separate salt input.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing encoded string.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordHashError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
