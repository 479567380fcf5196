//! Authentication types for the domain layer.
//!
//! A `Principal` is the authenticated caller for the duration of one request.
//! It is produced by token verification or a successful credential check and
//! is never built from raw client input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{DomainError, ErrorCode, UserId, ValidationError};

/// Role granted to a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// The authenticated caller: an id plus a role set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub roles: BTreeSet<Role>,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Principal {
    /// Creates a principal with the given roles.
    pub fn new(id: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id,
            roles: roles.into_iter().collect(),
            email: None,
            display_name: None,
        }
    }

    /// Attaches the email claim.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attaches the display name claim.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns true if the role set contains `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns true if the principal holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

/// Authentication errors from token verification and credential checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is malformed, has a bad signature, or lacks required claims.
    #[error("Invalid token")]
    InvalidToken,

    /// The token's expiry has passed.
    #[error("Token expired")]
    TokenExpired,

    /// No account for the email, or the password does not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account exists but is deactivated.
    #[error("Account is inactive")]
    AccountInactive,

    /// The signing backend is unusable (bad key material, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::InvalidToken => ErrorCode::TokenInvalid,
            AuthError::TokenExpired => ErrorCode::TokenExpired,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::AccountInactive => ErrorCode::AccountInactive,
            AuthError::ServiceUnavailable(_) => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}
