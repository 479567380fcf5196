use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{poisoned, IdSequence};
use crate::domain::account::{Account, Email};
use crate::domain::foundation::{DomainError, ErrorCode, Repository, UserId};
use crate::ports::AccountRepository;

/// Account store keyed by id with a unique email constraint.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<BTreeMap<UserId, Account>>,
    ids: IdSequence,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_email(email: &Email) -> DomainError {
    DomainError::validation("email", "Email is already registered")
        .with_detail("email", email.as_str())
}

#[async_trait]
impl Repository<Account, UserId> for InMemoryAccountRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.contains_key(&account.id()) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Account already exists: {}", account.id()),
            ));
        }
        if accounts.values().any(|a| a.email() == account.email()) {
            return Err(duplicate_email(account.email()));
        }
        self.ids.observe(account.id().value());
        accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if !accounts.contains_key(&account.id()) {
            return Err(DomainError::not_found("Account", account.id()));
        }
        if accounts
            .values()
            .any(|a| a.id() != account.id() && a.email() == account.email())
        {
            return Err(duplicate_email(account.email()));
        }
        accounts.insert(account.id(), account.clone());
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        accounts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Account", id))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn next_id(&self) -> Result<UserId, DomainError> {
        Ok(UserId::new(self.ids.next())?)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.values().find(|a| a.email() == email).cloned())
    }
}
