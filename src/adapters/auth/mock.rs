//! Mock session validator for testing.
//!
//! Maps fixed token strings to principals so handler tests can run without
//! signing real tokens.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_test_user("user-token", 7)
//!     .with_test_admin("admin-token", 99);
//!
//! let principal = validator.validate("user-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Principal, Role, UserId};
use crate::ports::SessionValidator;

/// Mock session validator for testing.
///
/// Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, Principal>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a principal.
    pub fn with_principal(self, token: impl Into<String>, principal: Principal) -> Self {
        self.add_token(token, principal);
        self
    }

    /// Adds a token for a plain user. Ids that are not positive are ignored.
    pub fn with_test_user(self, token: impl Into<String>, user_id: i64) -> Self {
        match UserId::new(user_id) {
            Ok(id) => self.with_principal(token, Principal::new(id, [Role::User])),
            Err(_) => self,
        }
    }

    /// Adds a token for an administrator. Ids that are not positive are ignored.
    pub fn with_test_admin(self, token: impl Into<String>, user_id: i64) -> Self {
        match UserId::new(user_id) {
            Ok(id) => self.with_principal(token, Principal::new(id, [Role::User, Role::Admin])),
            Err(_) => self,
        }
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn add_token(&self, token: impl Into<String>, principal: Principal) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), principal);
    }

    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }

    pub fn token_count(&self) -> usize {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
