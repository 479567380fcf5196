//! Token codec port: signs and verifies opaque identity tokens.
//!
//! The codec checks the signature and issuer only. Expiry is judged by the
//! token service against its injected clock.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AuthError;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the principal's user id.
    pub sub: String,

    /// Issuer.
    pub iss: String,

    /// Role names (`"user"`, `"admin"`).
    #[serde(alias = "groups")]
    pub roles: Vec<String>,

    /// Issued at (Unix seconds).
    pub iat: i64,

    /// Expires at (Unix seconds).
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Symmetric-key signing and verification of `TokenClaims`.
///
/// # Contract
///
/// - `decode` returns `AuthError::InvalidToken` for a bad signature, a
///   different issuer, or absent/malformed claims
/// - `decode` does not reject expired tokens
pub trait TokenCodec: Send + Sync {
    fn encode(&self, claims: &TokenClaims) -> Result<String, AuthError>;

    fn decode(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
