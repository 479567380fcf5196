//! Account and token handlers.

mod authenticate;
mod refresh_token;
mod register_account;

pub use authenticate::{AuthenticateCommand, AuthenticateHandler, AuthenticateResult};
pub use refresh_token::{RefreshTokenCommand, RefreshTokenHandler, RefreshTokenResult};
pub use register_account::{
    RegisterAccountCommand, RegisterAccountHandler, RegisterAccountResult,
};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Runs CPU-bound password hashing on the blocking pool.
async fn run_blocking<T, F>(work: F) -> Result<T, DomainError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!(error = %e, "Password hashing task failed");
        DomainError::new(ErrorCode::InternalError, "Password hashing task failed")
    })
}
