//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresRecipeRepository`
//! - `PostgresRatingRepository` - relies on the partial unique index
//!   `ratings_one_active_per_user`; a violation surfaces as `RatingConflict`
//! - `PostgresCommentRepository`
//! - `PostgresAccountRepository`
//! - `PostgresCatalogRepository<Id>` - one generic store over the
//!   `ingredients` and `utensils` tables
//!
//! Ids come from the tables' `BIGSERIAL` sequences so an aggregate can be
//! built with its final id before it is inserted.

mod account_repository;
mod catalog_repository;
mod comment_repository;
mod pool;
mod rating_repository;
mod recipe_repository;

pub use account_repository::PostgresAccountRepository;
pub use catalog_repository::{CatalogTable, PostgresCatalogRepository};
pub use comment_repository::PostgresCommentRepository;
pub use pool::{connect, migrate};
pub use rating_repository::PostgresRatingRepository;
pub use recipe_repository::PostgresRecipeRepository;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

const UNIQUE_VIOLATION: &str = "23505";

/// Wraps a sqlx failure with what was being attempted.
fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Reads a column, mapping decode failures to `DatabaseError`.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn timestamp_column(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    let value: chrono::DateTime<chrono::Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(value))
}

/// Malformed stored data is an infrastructure fault, not a caller error.
fn corrupt(what: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid stored {}: {}", what, err),
    )
}

async fn next_sequence_value(pool: &PgPool, sequence: &str) -> Result<i64, DomainError> {
    let (value,): (i64,) = sqlx::query_as("SELECT nextval($1::regclass)")
        .bind(sequence)
        .fetch_one(pool)
        .await
        .map_err(db_error("allocate id"))?;
    Ok(value)
}
