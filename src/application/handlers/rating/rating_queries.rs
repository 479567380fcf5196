//! Read-side rating handlers: per-recipe counts, a user's own rating, and
//! the most-rated ranking.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, RecipeId, UserId};
use crate::domain::rating::{RankedRecipe, RatingKind, RatingSummary};
use crate::ports::{RatingRepository, RecipeRepository};

/// Default ranking size when callers don't pass one.
pub const DEFAULT_MOST_RATED_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct GetRatingSummaryQuery {
    pub recipe_id: RecipeId,
}

/// Counts active likes and dislikes for one recipe.
pub struct GetRatingSummaryHandler {
    recipes: Arc<dyn RecipeRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl GetRatingSummaryHandler {
    pub fn new(recipes: Arc<dyn RecipeRepository>, ratings: Arc<dyn RatingRepository>) -> Self {
        Self { recipes, ratings }
    }

    pub async fn handle(&self, query: GetRatingSummaryQuery) -> Result<RatingSummary, DomainError> {
        if !self.recipes.exists(query.recipe_id).await? {
            return Err(DomainError::not_found("Recipe", query.recipe_id));
        }
        self.ratings.summarize(query.recipe_id).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GetUserRatingQuery {
    pub recipe_id: RecipeId,
    pub user_id: UserId,
}

/// Returns the kind of the user's active rating, if any.
pub struct GetUserRatingHandler {
    ratings: Arc<dyn RatingRepository>,
}

impl GetUserRatingHandler {
    pub fn new(ratings: Arc<dyn RatingRepository>) -> Self {
        Self { ratings }
    }

    pub async fn handle(&self, query: GetUserRatingQuery) -> Result<Option<RatingKind>, DomainError> {
        Ok(self
            .ratings
            .find_active(query.recipe_id, query.user_id)
            .await?
            .map(|rating| rating.kind()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MostRatedQuery {
    pub limit: usize,
}

impl Default for MostRatedQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_MOST_RATED_LIMIT,
        }
    }
}

/// Ranks recipes by popularity score (likes minus dislikes).
pub struct MostRatedHandler {
    ratings: Arc<dyn RatingRepository>,
}

impl MostRatedHandler {
    pub fn new(ratings: Arc<dyn RatingRepository>) -> Self {
        Self { ratings }
    }

    pub async fn handle(&self, query: MostRatedQuery) -> Result<Vec<RankedRecipe>, DomainError> {
        if query.limit == 0 {
            return Ok(Vec::new());
        }
        self.ratings.most_rated(query.limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::rating::{RateRecipeCommand, RemoveRatingCommand};
    use crate::application::handlers::test_support::{user, Fixture};
    use crate::domain::foundation::ErrorCode;

    async fn rate(fx: &Fixture, user_id: i64, recipe_id: RecipeId, kind: RatingKind) {
        fx.rate_handler()
            .handle(RateRecipeCommand {
                principal: user(user_id),
                recipe_id,
                kind,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn summary_counts_only_active_ratings() {
        let fx = Fixture::new();
        let recipe = fx.seed_recipe(7, None).await;
        rate(&fx, 1, recipe.id(), RatingKind::Like).await;
        rate(&fx, 2, recipe.id(), RatingKind::Like).await;
        rate(&fx, 3, recipe.id(), RatingKind::Dislike).await;
        fx.remove_rating_handler()
            .handle(RemoveRatingCommand {
                principal: user(2),
                recipe_id: recipe.id(),
            })
            .await
            .unwrap();

        let summary = GetRatingSummaryHandler::new(fx.recipes.clone(), fx.ratings.clone())
            .handle(GetRatingSummaryQuery {
                recipe_id: recipe.id(),
            })
            .await
            .unwrap();

        assert_eq!(summary.likes, 1);
        assert_eq!(summary.dislikes, 1);
        assert_eq!(summary.total(), 2);
    }

    #[tokio::test]
    async fn summary_for_unknown_recipe_is_not_found() {
        let fx = Fixture::new();

        let err = GetRatingSummaryHandler::new(fx.recipes.clone(), fx.ratings.clone())
            .handle(GetRatingSummaryQuery {
                recipe_id: RecipeId::new(404).unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn user_rating_reports_active_kind_or_none() {
        let fx = Fixture::new();
        let recipe = fx.seed_recipe(7, None).await;
        rate(&fx, 3, recipe.id(), RatingKind::Dislike).await;
        let handler = GetUserRatingHandler::new(fx.ratings.clone());

        let mine = handler
            .handle(GetUserRatingQuery {
                recipe_id: recipe.id(),
                user_id: UserId::new(3).unwrap(),
            })
            .await
            .unwrap();
        let theirs = handler
            .handle(GetUserRatingQuery {
                recipe_id: recipe.id(),
                user_id: UserId::new(4).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(mine, Some(RatingKind::Dislike));
        assert_eq!(theirs, None);
    }

    #[tokio::test]
    async fn most_rated_orders_by_score_then_id() {
        let fx = Fixture::new();
        let a = fx.seed_recipe(7, None).await;
        let b = fx.seed_recipe(7, None).await;
        let c = fx.seed_recipe(7, None).await;
        rate(&fx, 1, a.id(), RatingKind::Like).await;
        rate(&fx, 1, b.id(), RatingKind::Like).await;
        rate(&fx, 2, b.id(), RatingKind::Like).await;
        rate(&fx, 1, c.id(), RatingKind::Like).await;

        let ranking = MostRatedHandler::new(fx.ratings.clone())
            .handle(MostRatedQuery::default())
            .await
            .unwrap();
        let ids: Vec<RecipeId> = ranking.iter().map(|r| r.recipe_id).collect();

        assert_eq!(ids, vec![b.id(), a.id(), c.id()]);

        let top = MostRatedHandler::new(fx.ratings.clone())
            .handle(MostRatedQuery { limit: 1 })
            .await
            .unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].summary.popularity_score(), 2);
    }
}
