//! RateRecipeHandler - Like or dislike a recipe, switching kind when already rated.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::foundation::{DomainError, Principal, RecipeId};
use crate::domain::rating::{Rating, RatingKind};
use crate::ports::{Clock, RatingRepository, RecipeRepository};

/// Command to rate a recipe as the calling principal.
#[derive(Debug, Clone)]
pub struct RateRecipeCommand {
    pub principal: Principal,
    pub recipe_id: RecipeId,
    pub kind: RatingKind,
}

/// What the command did to the caller's rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOutcome {
    /// A new active rating was inserted.
    Created,
    /// The existing active rating switched kind.
    Changed,
    /// The existing active rating already had this kind.
    Unchanged,
}

/// Result of rating a recipe.
#[derive(Debug, Clone)]
pub struct RateRecipeResult {
    pub rating: Rating,
    pub outcome: RateOutcome,
}

/// Handler for rating recipes.
///
/// Looks up the caller's active rating first and changes its kind when one
/// exists. Otherwise inserts through the store's uniqueness-checked path; if
/// a concurrent request won that race, re-reads once and changes the winner.
pub struct RateRecipeHandler {
    recipes: Arc<dyn RecipeRepository>,
    ratings: Arc<dyn RatingRepository>,
    clock: Arc<dyn Clock>,
}

impl RateRecipeHandler {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        ratings: Arc<dyn RatingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            recipes,
            ratings,
            clock,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the recipe does not exist
    /// - `RatingConflict` if the store still reports a conflict after one re-read
    pub async fn handle(&self, cmd: RateRecipeCommand) -> Result<RateRecipeResult, DomainError> {
        let user_id = cmd.principal.id;

        if !self.recipes.exists(cmd.recipe_id).await? {
            return Err(DomainError::not_found("Recipe", cmd.recipe_id));
        }

        if let Some(existing) = self.ratings.find_active(cmd.recipe_id, user_id).await? {
            return self.change_kind(existing, cmd.kind).await;
        }

        let id = self.ratings.next_id().await?;
        let rating = Rating::rate(id, cmd.recipe_id, user_id, cmd.kind, self.clock.now());

        match self.ratings.insert_active(&rating).await {
            Ok(()) => {
                info!(
                    rating_id = %rating.id(),
                    recipe_id = %rating.recipe_id(),
                    user_id = %user_id,
                    kind = %rating.kind(),
                    "Recipe rated"
                );
                Ok(RateRecipeResult {
                    rating,
                    outcome: RateOutcome::Created,
                })
            }
            Err(err) if err.is_retryable() => {
                debug!(
                    recipe_id = %cmd.recipe_id,
                    user_id = %user_id,
                    "Concurrent rating detected, re-reading"
                );
                let existing = self
                    .ratings
                    .find_active(cmd.recipe_id, user_id)
                    .await?
                    .ok_or(err)?;
                self.change_kind(existing, cmd.kind).await
            }
            Err(err) => Err(err),
        }
    }

    async fn change_kind(
        &self,
        mut rating: Rating,
        kind: RatingKind,
    ) -> Result<RateRecipeResult, DomainError> {
        if !rating.change_kind(kind)? {
            return Ok(RateRecipeResult {
                rating,
                outcome: RateOutcome::Unchanged,
            });
        }

        self.ratings.update(&rating).await?;

        info!(
            rating_id = %rating.id(),
            recipe_id = %rating.recipe_id(),
            user_id = %rating.user_id(),
            kind = %rating.kind(),
            "Rating kind changed"
        );

        Ok(RateRecipeResult {
            rating,
            outcome: RateOutcome::Changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user, Fixture};
    use crate::domain::foundation::{ErrorCode, RatingId, Timestamp, UserId};
    use crate::domain::rating::{RankedRecipe, RatingSummary};
    use async_trait::async_trait;

    fn rate(user_id: i64, recipe_id: RecipeId, kind: RatingKind) -> RateRecipeCommand {
        RateRecipeCommand {
            principal: user(user_id),
            recipe_id,
            kind,
        }
    }

    #[tokio::test]
    async fn first_rating_creates_active_row() {
        let fx = Fixture::new();
        let recipe = fx.seed_recipe(7, None).await;

        let result = fx
            .rate_handler()
            .handle(rate(3, recipe.id(), RatingKind::Like))
            .await
            .unwrap();

        assert_eq!(result.outcome, RateOutcome::Created);
        assert!(result.rating.is_like());
        assert_eq!(fx.ratings.all().len(), 1);
    }

    #[tokio::test]
    async fn rating_again_with_same_kind_is_unchanged() {
        let fx = Fixture::new();
        let recipe = fx.seed_recipe(7, None).await;
        fx.rate_handler()
            .handle(rate(3, recipe.id(), RatingKind::Like))
            .await
            .unwrap();

        let result = fx
            .rate_handler()
            .handle(rate(3, recipe.id(), RatingKind::Like))
            .await
            .unwrap();

        assert_eq!(result.outcome, RateOutcome::Unchanged);
        assert_eq!(fx.ratings.all().len(), 1);
    }

    #[tokio::test]
    async fn rating_again_with_other_kind_changes_in_place() {
        let fx = Fixture::new();
        let recipe = fx.seed_recipe(7, None).await;
        let first = fx
            .rate_handler()
            .handle(rate(3, recipe.id(), RatingKind::Like))
            .await
            .unwrap();

        let second = fx
            .rate_handler()
            .handle(rate(3, recipe.id(), RatingKind::Dislike))
            .await
            .unwrap();

        assert_eq!(second.outcome, RateOutcome::Changed);
        assert_eq!(second.rating.id(), first.rating.id());
        assert_eq!(second.rating.created_at(), first.rating.created_at());
        assert_eq!(fx.ratings.all().len(), 1);
    }

    #[tokio::test]
    async fn unknown_recipe_is_not_found() {
        let fx = Fixture::new();

        let err = fx
            .rate_handler()
            .handle(rate(3, RecipeId::new(404).unwrap(), RatingKind::Like))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(fx.ratings.all().is_empty());
    }

    /// Store that hides the active row from the first lookup, simulating a
    /// concurrent insert landing between lookup and insert.
    struct RacingStore {
        inner: Arc<crate::adapters::memory::InMemoryRatingRepository>,
        first_lookup_done: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl RatingRepository for RacingStore {
        async fn next_id(&self) -> Result<RatingId, DomainError> {
            self.inner.next_id().await
        }
        async fn insert_active(&self, rating: &Rating) -> Result<(), DomainError> {
            self.inner.insert_active(rating).await
        }
        async fn update(&self, rating: &Rating) -> Result<(), DomainError> {
            self.inner.update(rating).await
        }
        async fn find_by_id(&self, id: RatingId) -> Result<Option<Rating>, DomainError> {
            self.inner.find_by_id(id).await
        }
        async fn find_active(
            &self,
            recipe_id: RecipeId,
            user_id: UserId,
        ) -> Result<Option<Rating>, DomainError> {
            if !self
                .first_lookup_done
                .swap(true, std::sync::atomic::Ordering::SeqCst)
            {
                return Ok(None);
            }
            self.inner.find_active(recipe_id, user_id).await
        }
        async fn find_by_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Rating>, DomainError> {
            self.inner.find_by_recipe(recipe_id).await
        }
        async fn summarize(&self, recipe_id: RecipeId) -> Result<RatingSummary, DomainError> {
            self.inner.summarize(recipe_id).await
        }
        async fn most_rated(&self, limit: usize) -> Result<Vec<RankedRecipe>, DomainError> {
            self.inner.most_rated(limit).await
        }
    }

    #[tokio::test]
    async fn lost_insert_race_switches_to_change_kind() {
        let fx = Fixture::new();
        let recipe = fx.seed_recipe(7, None).await;

        // The concurrent winner
        let winner = Rating::rate(
            RatingId::new(500).unwrap(),
            recipe.id(),
            UserId::new(3).unwrap(),
            RatingKind::Like,
            Timestamp::from_unix_secs(1).unwrap(),
        );
        fx.ratings.insert_active(&winner).await.unwrap();

        let store = Arc::new(RacingStore {
            inner: fx.ratings.clone(),
            first_lookup_done: std::sync::atomic::AtomicBool::new(false),
        });
        let handler = RateRecipeHandler::new(fx.recipes.clone(), store, fx.clock.clone());

        let result = handler
            .handle(rate(3, recipe.id(), RatingKind::Dislike))
            .await
            .unwrap();

        assert_eq!(result.outcome, RateOutcome::Changed);
        assert_eq!(result.rating.id(), winner.id());
        assert_eq!(fx.ratings.all().len(), 1);
        assert_eq!(
            fx.ratings.summarize(recipe.id()).await.unwrap(),
            RatingSummary::new(0, 1)
        );
    }
}
