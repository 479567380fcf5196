//! RefreshTokenHandler - Reissues a token from the account's current state.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::token_service::{IssuedToken, TokenService};
use crate::domain::foundation::{AuthError, DomainError, Principal, Repository};
use crate::ports::AccountRepository;

/// Command to refresh a principal's token.
#[derive(Debug, Clone)]
pub struct RefreshTokenCommand {
    pub principal: Principal,
}

/// Result carrying the refreshed principal and its token.
#[derive(Debug, Clone)]
pub struct RefreshTokenResult {
    pub principal: Principal,
    pub token: IssuedToken,
}

/// Handler for token refresh.
///
/// Roles come from the stored account rather than the presented principal,
/// so a revoked admin flag takes effect on the next refresh.
pub struct RefreshTokenHandler {
    accounts: Arc<dyn AccountRepository>,
    tokens: Arc<TokenService>,
}

impl RefreshTokenHandler {
    pub fn new(accounts: Arc<dyn AccountRepository>, tokens: Arc<TokenService>) -> Self {
        Self { accounts, tokens }
    }

    /// # Errors
    ///
    /// - `NotFound` if the account no longer exists
    /// - `AccountInactive` if the account is deactivated
    pub async fn handle(&self, cmd: RefreshTokenCommand) -> Result<RefreshTokenResult, DomainError> {
        let account = self
            .accounts
            .find_by_id(cmd.principal.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Account", cmd.principal.id))?;

        if !account.is_active() {
            warn!(user_id = %account.id(), "Token refresh on inactive account");
            return Err(AuthError::AccountInactive.into());
        }

        let principal = account.principal();
        let token = self.tokens.issue(&principal)?;

        info!(user_id = %principal.id, expires_at = %token.expires_at, "Token refreshed");

        Ok(RefreshTokenResult { principal, token })
    }
}
