//! Session validation port for bearer token validation.
//!
//! Turns a presented access token into the `Principal` that authorization
//! decisions are made against. The token service is the production
//! implementation; a mock exists for tests.
//!
//! # Example Implementation
//!
//! ```ignore
//! #[async_trait]
//! impl SessionValidator for TokenService {
//!     async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
//!         self.verify(token)
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal};

/// Validates access tokens and extracts the caller's identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature and issuer
/// - Return `AuthError::InvalidToken` for malformed tokens, bad signatures,
///   or missing/malformed claims
/// - Return `AuthError::TokenExpired` when the expiry has passed
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without "Bearer " prefix) and return the principal.
    async fn validate(&self, token: &str) -> Result<Principal, AuthError>;
}
