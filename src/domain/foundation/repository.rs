//! Base repository trait for persistence operations.
//!
//! Aggregate repositories inherit the keyed CRUD interface from
//! `Repository<T, ID>` and add only their domain-specific queries.
//!
//! # Example
//!
//! ```ignore
//! #[async_trait]
//! pub trait RecipeRepository: Repository<Recipe, RecipeId> {
//!     async fn find_by_author(&self, author: UserId) -> Result<Vec<Recipe>, DomainError>;
//! }
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use super::DomainError;

/// Base trait for aggregate repositories.
///
/// # Error Handling
///
/// All methods return `Result<_, DomainError>`. Implementations convert
/// adapter-specific errors into `DatabaseError`, and report a missing
/// aggregate on `update`/`delete` as `NotFound`.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync + Debug + 'static,
{
    /// Finds an aggregate by its unique identifier.
    ///
    /// Returns `Ok(None)` if the aggregate doesn't exist.
    /// Returns `Err` only for infrastructure failures.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, DomainError>;

    /// Persists a new aggregate.
    async fn save(&self, entity: &T) -> Result<(), DomainError>;

    /// Updates an existing aggregate.
    async fn update(&self, entity: &T) -> Result<(), DomainError>;

    /// Deletes an aggregate by its identifier.
    async fn delete(&self, id: ID) -> Result<(), DomainError>;

    /// Checks if an aggregate with the given ID exists.
    ///
    /// Default implementation uses `find_by_id`.
    async fn exists(&self, id: ID) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
