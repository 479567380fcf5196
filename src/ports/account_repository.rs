//! Account repository port.

use async_trait::async_trait;

use crate::domain::account::{Account, Email};
use crate::domain::foundation::{DomainError, Repository, UserId};

/// Repository port for Account aggregate persistence.
///
/// Emails are unique; `save` fails with `ValidationFailed` on a duplicate.
#[async_trait]
pub trait AccountRepository: Repository<Account, UserId> {
    async fn next_id(&self) -> Result<UserId, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, DomainError>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AccountRepository) {}
    }
}
