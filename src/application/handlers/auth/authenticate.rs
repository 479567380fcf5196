//! AuthenticateHandler - Credential check that issues an access token.

use std::sync::Arc;
use tracing::{info, warn};

use super::run_blocking;
use crate::application::token_service::{IssuedToken, TokenService};
use crate::domain::account::Email;
use crate::domain::foundation::{AuthError, DomainError, Principal};
use crate::ports::{AccountRepository, PasswordHasher};

/// Command to log in with email and password.
#[derive(Clone)]
pub struct AuthenticateCommand {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AuthenticateCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthenticateResult {
    pub principal: Principal,
    pub token: IssuedToken,
}

/// Handler for logging in.
pub struct AuthenticateHandler {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenService>,
}

impl AuthenticateHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
        }
    }

    /// # Errors
    ///
    /// - `InvalidCredentials` if no account has that email or the password does not match
    /// - `AccountInactive` if the account is deactivated
    pub async fn handle(&self, cmd: AuthenticateCommand) -> Result<AuthenticateResult, DomainError> {
        // An unparseable email cannot belong to any account.
        let email =
            Email::parse(&cmd.email).map_err(|_| DomainError::from(AuthError::InvalidCredentials))?;

        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !account.is_active() {
            warn!(user_id = %account.id(), "Login attempt on inactive account");
            return Err(AuthError::AccountInactive.into());
        }

        let hasher = Arc::clone(&self.hasher);
        let password = cmd.password;
        let stored_hash = account.password_hash().to_string();
        if !run_blocking(move || hasher.verify(&password, &stored_hash)).await? {
            warn!(user_id = %account.id(), "Login failed: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let principal = account.principal();
        let token = self.tokens.issue(&principal)?;

        info!(user_id = %principal.id, admin = principal.is_admin(), "Account authenticated");

        Ok(AuthenticateResult { principal, token })
    }
}
