//! RegisterAccountHandler - Command handler for signing up.

use std::sync::Arc;
use tracing::info;

use super::run_blocking;
use crate::domain::account::{Account, Email};
use crate::domain::foundation::{DomainError, Repository};
use crate::ports::{AccountRepository, Clock, PasswordHasher};

/// Command to create a new account.
#[derive(Clone)]
pub struct RegisterAccountCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterAccountCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterAccountCommand")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Result of successful registration.
#[derive(Debug, Clone)]
pub struct RegisterAccountResult {
    pub account: Account,
}

/// Handler for registering accounts.
pub struct RegisterAccountHandler {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl RegisterAccountHandler {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            clock,
        }
    }

    /// # Errors
    ///
    /// - `ValidationFailed` for a malformed or already registered email,
    ///   a blank name, or a blank password
    pub async fn handle(
        &self,
        cmd: RegisterAccountCommand,
    ) -> Result<RegisterAccountResult, DomainError> {
        let email = Email::parse(&cmd.email)?;
        if cmd.password.trim().is_empty() {
            return Err(DomainError::validation("password", "Password cannot be empty"));
        }

        if self.accounts.exists_by_email(&email).await? {
            return Err(DomainError::validation("email", "Email is already registered")
                .with_detail("email", email.as_str()));
        }

        let hasher = Arc::clone(&self.hasher);
        let password = cmd.password;
        let password_hash = run_blocking(move || hasher.hash(&password)).await??;
        let id = self.accounts.next_id().await?;
        let account = Account::register(id, &cmd.name, email, password_hash, self.clock.now())?;

        self.accounts.save(&account).await?;

        info!(user_id = %account.id(), "Account registered");

        Ok(RegisterAccountResult { account })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::ErrorCode;

    fn cmd(email: &str, password: &str) -> RegisterAccountCommand {
        RegisterAccountCommand {
            name: "Cook".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn stores_hash_not_plaintext() {
        let fx = Fixture::new();

        let result = fx
            .register_handler()
            .handle(cmd("Cook@Example.com", "hunter22"))
            .await
            .unwrap();

        let stored = fx.accounts.find_by_id(result.account.id()).await.unwrap().unwrap();
        assert_eq!(stored.email().as_str(), "cook@example.com");
        assert_ne!(stored.password_hash(), "hunter22");
        assert!(stored.password_hash().starts_with("$argon2id$"));
        assert!(stored.is_active());
        assert!(!stored.is_admin());
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let fx = Fixture::new();
        fx.register_handler()
            .handle(cmd("cook@example.com", "hunter22"))
            .await
            .unwrap();

        let err = fx
            .register_handler()
            .handle(cmd("COOK@example.com", "other-pass"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("email"));
    }

    #[tokio::test]
    async fn rejects_blank_password() {
        let fx = Fixture::new();

        let err = fx
            .register_handler()
            .handle(cmd("cook@example.com", "   "))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn rejects_malformed_email() {
        let fx = Fixture::new();

        let err = fx
            .register_handler()
            .handle(cmd("cook.example.com", "hunter22"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
