//! Rating repository port.
//!
//! The store enforces at most one active rating per (recipe, user) pair.
//! Concurrent inserts for the same pair resolve to exactly one winner; the
//! loser receives `RatingConflict`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RatingId, RecipeId, UserId};
use crate::domain::rating::{RankedRecipe, Rating, RatingSummary};

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Reserve the identifier for a new rating.
    async fn next_id(&self) -> Result<RatingId, DomainError>;

    /// Insert a new active rating.
    ///
    /// # Errors
    ///
    /// - `RatingConflict` if an active rating already exists for the pair
    /// - `DatabaseError` on persistence failure
    async fn insert_active(&self, rating: &Rating) -> Result<(), DomainError>;

    /// Persist the kind and deletion state of an existing rating.
    ///
    /// A soft delete is never undone: writing a deleted rating over a row
    /// that is already deleted leaves the stored row unchanged.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no row has this id, or the stored row is deleted and
    ///   the rating is active
    async fn update(&self, rating: &Rating) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: RatingId) -> Result<Option<Rating>, DomainError>;

    /// The active rating for the pair, if any.
    async fn find_active(
        &self,
        recipe_id: RecipeId,
        user_id: UserId,
    ) -> Result<Option<Rating>, DomainError>;

    /// Every rating row for the recipe, active or deleted.
    async fn find_by_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Rating>, DomainError>;

    /// Active like/dislike counts for the recipe.
    async fn summarize(&self, recipe_id: RecipeId) -> Result<RatingSummary, DomainError>;

    /// Recipes with at least one active rating, ordered by popularity score
    /// descending and then recipe id ascending.
    async fn most_rated(&self, limit: usize) -> Result<Vec<RankedRecipe>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn RatingRepository) {}
    }
}
