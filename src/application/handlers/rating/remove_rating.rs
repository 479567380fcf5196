//! RemoveRatingHandler - Soft-deletes the caller's active rating.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{DomainError, Principal, RecipeId};
use crate::domain::rating::Rating;
use crate::ports::{Clock, RatingRepository};

/// Command to withdraw the caller's rating for a recipe.
#[derive(Debug, Clone)]
pub struct RemoveRatingCommand {
    pub principal: Principal,
    pub recipe_id: RecipeId,
}

/// Result holding the now-deleted rating.
#[derive(Debug, Clone)]
pub struct RemoveRatingResult {
    pub rating: Rating,
}

pub struct RemoveRatingHandler {
    ratings: Arc<dyn RatingRepository>,
    clock: Arc<dyn Clock>,
}

impl RemoveRatingHandler {
    pub fn new(ratings: Arc<dyn RatingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { ratings, clock }
    }

    /// # Errors
    ///
    /// - `NotFound` if the caller has no active rating for the recipe
    pub async fn handle(&self, cmd: RemoveRatingCommand) -> Result<RemoveRatingResult, DomainError> {
        let user_id = cmd.principal.id;
        let mut rating = self
            .ratings
            .find_active(cmd.recipe_id, user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Rating", format!("{}/{}", cmd.recipe_id, user_id))
            })?;

        rating.soft_delete(self.clock.now());
        self.ratings.update(&rating).await?;

        info!(
            rating_id = %rating.id(),
            recipe_id = %cmd.recipe_id,
            user_id = %user_id,
            "Rating removed"
        );

        Ok(RemoveRatingResult { rating })
    }
}
