//! Password hashing port.

use crate::domain::foundation::DomainError;

/// Salted slow hashing of account passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the hashing backend fails
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Returns true if `plaintext` matches `hash`.
    ///
    /// A malformed `hash` never matches.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}
