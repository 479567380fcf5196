//! PostgreSQL implementation of AccountRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, corrupt, db_error, is_unique_violation, next_sequence_value, timestamp_column};
use crate::domain::account::{Account, AccountStatus, Email};
use crate::domain::foundation::{DomainError, Repository, UserId};
use crate::ports::AccountRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, email, password_hash, is_admin, status, created_at, updated_at
    FROM accounts
"#;

#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error<'a>(
    action: &'static str,
    account: &'a Account,
) -> impl FnOnce(sqlx::Error) -> DomainError + 'a {
    move |e| {
        if is_unique_violation(&e) {
            DomainError::validation("email", "Email is already registered")
                .with_detail("email", account.email().as_str())
        } else {
            db_error(action)(e)
        }
    }
}

#[async_trait]
impl Repository<Account, UserId> for PostgresAccountRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch account"))?;

        row.as_ref().map(row_to_account).transpose()
    }

    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                id, name, email, password_hash, is_admin, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(account.id().value())
        .bind(account.name())
        .bind(account.email().as_str())
        .bind(account.password_hash())
        .bind(account.is_admin())
        .bind(account.status().as_str())
        .bind(account.created_at().as_datetime())
        .bind(account.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_write_error("insert account", account))?;

        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                name = $2,
                email = $3,
                password_hash = $4,
                is_admin = $5,
                status = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(account.id().value())
        .bind(account.name())
        .bind(account.email().as_str())
        .bind(account.password_hash())
        .bind(account.is_admin())
        .bind(account.status().as_str())
        .bind(account.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_write_error("update account", account))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Account", account.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete account"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Account", id));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn next_id(&self) -> Result<UserId, DomainError> {
        let raw = next_sequence_value(&self.pool, "accounts_id_seq").await?;
        UserId::new(raw).map_err(|e| corrupt("account id", e))
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE email = $1", SELECT_COLUMNS))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch account by email"))?;

        row.as_ref().map(row_to_account).transpose()
    }
}

fn row_to_account(row: &PgRow) -> Result<Account, DomainError> {
    let id: i64 = column(row, "id")?;
    let email: String = column(row, "email")?;
    let status: String = column(row, "status")?;

    Ok(Account::reconstitute(
        UserId::new(id).map_err(|e| corrupt("account id", e))?,
        column(row, "name")?,
        Email::parse(&email).map_err(|e| corrupt("email", e))?,
        column(row, "password_hash")?,
        column(row, "is_admin")?,
        AccountStatus::parse(&status).ok_or_else(|| corrupt("account status", &status))?,
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
    ))
}
