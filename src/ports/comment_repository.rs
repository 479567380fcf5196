//! Comment repository port.

use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::foundation::{CommentId, DomainError, RecipeId};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn next_id(&self) -> Result<CommentId, DomainError>;

    async fn save(&self, comment: &Comment) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `NotFound` if the comment doesn't exist
    async fn update(&self, comment: &Comment) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, DomainError>;

    /// Active comments on the recipe, oldest first.
    async fn find_active_by_recipe(&self, recipe_id: RecipeId)
        -> Result<Vec<Comment>, DomainError>;
}
