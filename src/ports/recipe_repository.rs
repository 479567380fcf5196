//! Recipe repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RecipeId, Repository, UserId};
use crate::domain::recipe::Recipe;

/// Repository port for Recipe aggregate persistence.
///
/// `delete` removes the row; recipes are not soft-deleted.
#[async_trait]
pub trait RecipeRepository: Repository<Recipe, RecipeId> {
    /// Reserve the identifier for a new recipe.
    async fn next_id(&self) -> Result<RecipeId, DomainError>;

    /// Recipes written by `author`, oldest first.
    async fn find_by_author(&self, author: UserId) -> Result<Vec<Recipe>, DomainError>;
}
