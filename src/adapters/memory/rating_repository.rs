//! In-memory rating store enforcing one active rating per (recipe, user).

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use super::{poisoned, IdSequence};
use crate::domain::foundation::{DomainError, ErrorCode, RatingId, RecipeId, UserId};
use crate::domain::rating::{rank_by_popularity, RankedRecipe, Rating, RatingSummary};
use crate::ports::RatingRepository;

#[derive(Debug, Default)]
pub struct InMemoryRatingRepository {
    ratings: Mutex<BTreeMap<RatingId, Rating>>,
    ids: IdSequence,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row, active or deleted.
    pub fn all(&self) -> Vec<Rating> {
        self.ratings
            .lock()
            .map(|r| r.values().cloned().collect())
            .unwrap_or_default()
    }

    fn conflict(rating: &Rating) -> DomainError {
        DomainError::new(
            ErrorCode::RatingConflict,
            "An active rating already exists for this recipe and user",
        )
        .with_detail("recipe_id", rating.recipe_id().to_string())
        .with_detail("user_id", rating.user_id().to_string())
    }
}

fn is_active_for_pair(row: &Rating, recipe_id: RecipeId, user_id: UserId) -> bool {
    row.is_active() && row.recipe_id() == recipe_id && row.user_id() == user_id
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn next_id(&self) -> Result<RatingId, DomainError> {
        Ok(RatingId::new(self.ids.next())?)
    }

    async fn insert_active(&self, rating: &Rating) -> Result<(), DomainError> {
        let mut ratings = self.ratings.lock().map_err(poisoned)?;
        if ratings.contains_key(&rating.id()) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Rating already exists: {}", rating.id()),
            ));
        }
        if rating.is_active()
            && ratings
                .values()
                .any(|row| is_active_for_pair(row, rating.recipe_id(), rating.user_id()))
        {
            return Err(Self::conflict(rating));
        }
        self.ids.observe(rating.id().value());
        ratings.insert(rating.id(), rating.clone());
        Ok(())
    }

    async fn update(&self, rating: &Rating) -> Result<(), DomainError> {
        let mut ratings = self.ratings.lock().map_err(poisoned)?;
        let stored_active = match ratings.get(&rating.id()) {
            Some(stored) => stored.is_active(),
            None => return Err(DomainError::not_found("Rating", rating.id())),
        };
        if !stored_active {
            // Deletion is final; the stored row keeps its first deleted_at.
            if rating.is_active() {
                return Err(DomainError::not_found("Rating", rating.id()));
            }
            return Ok(());
        }
        if rating.is_active()
            && ratings.values().any(|row| {
                row.id() != rating.id()
                    && is_active_for_pair(row, rating.recipe_id(), rating.user_id())
            })
        {
            return Err(Self::conflict(rating));
        }
        ratings.insert(rating.id(), rating.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RatingId) -> Result<Option<Rating>, DomainError> {
        Ok(self.ratings.lock().map_err(poisoned)?.get(&id).cloned())
    }

    async fn find_active(
        &self,
        recipe_id: RecipeId,
        user_id: UserId,
    ) -> Result<Option<Rating>, DomainError> {
        let ratings = self.ratings.lock().map_err(poisoned)?;
        Ok(ratings
            .values()
            .find(|row| is_active_for_pair(row, recipe_id, user_id))
            .cloned())
    }

    async fn find_by_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Rating>, DomainError> {
        let ratings = self.ratings.lock().map_err(poisoned)?;
        Ok(ratings
            .values()
            .filter(|row| row.recipe_id() == recipe_id)
            .cloned()
            .collect())
    }

    async fn summarize(&self, recipe_id: RecipeId) -> Result<RatingSummary, DomainError> {
        let ratings = self.ratings.lock().map_err(poisoned)?;
        Ok(RatingSummary::from_ratings(
            ratings.values().filter(|row| row.recipe_id() == recipe_id),
        ))
    }

    async fn most_rated(&self, limit: usize) -> Result<Vec<RankedRecipe>, DomainError> {
        let ratings = self.ratings.lock().map_err(poisoned)?;
        let mut by_recipe: HashMap<RecipeId, Vec<&Rating>> = HashMap::new();
        for row in ratings.values().filter(|row| row.is_active()) {
            by_recipe.entry(row.recipe_id()).or_default().push(row);
        }
        let entries = by_recipe
            .into_iter()
            .map(|(recipe_id, rows)| RankedRecipe {
                recipe_id,
                summary: RatingSummary::from_ratings(rows),
            })
            .collect();
        Ok(rank_by_popularity(entries, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::rating::RatingKind;
    use std::sync::Arc;

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_000).unwrap()
    }

    fn rating(id: i64, recipe: i64, user: i64, kind: RatingKind) -> Rating {
        Rating::rate(
            RatingId::new(id).unwrap(),
            RecipeId::new(recipe).unwrap(),
            UserId::new(user).unwrap(),
            kind,
            now(),
        )
    }

    #[tokio::test]
    async fn insert_active_rejects_second_active_for_pair() {
        let repo = InMemoryRatingRepository::new();
        repo.insert_active(&rating(1, 42, 3, RatingKind::Like)).await.unwrap();

        let err = repo
            .insert_active(&rating(2, 42, 3, RatingKind::Dislike))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RatingConflict);
        assert!(err.is_retryable());
        assert_eq!(repo.all().len(), 1);
    }

    #[tokio::test]
    async fn insert_active_allows_new_row_after_soft_delete() {
        let repo = InMemoryRatingRepository::new();
        let mut first = rating(1, 42, 3, RatingKind::Like);
        repo.insert_active(&first).await.unwrap();
        first.soft_delete(now());
        repo.update(&first).await.unwrap();

        repo.insert_active(&rating(2, 42, 3, RatingKind::Dislike)).await.unwrap();

        assert_eq!(repo.all().len(), 2);
        let active = repo
            .find_active(RecipeId::new(42).unwrap(), UserId::new(3).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.id().value(), 2);
    }

    #[tokio::test]
    async fn concurrent_inserts_for_same_pair_yield_one_winner() {
        let repo = Arc::new(InMemoryRatingRepository::new());
        let mut tasks = Vec::new();
        for i in 1..=8 {
            let repo = repo.clone();
            tasks.push(tokio::spawn(async move {
                repo.insert_active(&rating(i, 42, 3, RatingKind::Like)).await
            }));
        }

        let mut successes = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repo.all().iter().filter(|r| r.is_active()).count(), 1);
    }

    #[tokio::test]
    async fn summarize_counts_active_rows_for_recipe() {
        let repo = InMemoryRatingRepository::new();
        repo.insert_active(&rating(1, 42, 1, RatingKind::Like)).await.unwrap();
        repo.insert_active(&rating(2, 42, 2, RatingKind::Dislike)).await.unwrap();
        repo.insert_active(&rating(3, 42, 3, RatingKind::Like)).await.unwrap();
        repo.insert_active(&rating(4, 7, 1, RatingKind::Like)).await.unwrap();

        let summary = repo.summarize(RecipeId::new(42).unwrap()).await.unwrap();

        assert_eq!(summary, RatingSummary::new(2, 1));
    }

    #[tokio::test]
    async fn most_rated_orders_by_score_and_skips_deleted() {
        let repo = InMemoryRatingRepository::new();
        repo.insert_active(&rating(1, 10, 1, RatingKind::Like)).await.unwrap();
        repo.insert_active(&rating(2, 20, 1, RatingKind::Like)).await.unwrap();
        repo.insert_active(&rating(3, 20, 2, RatingKind::Like)).await.unwrap();
        let mut gone = rating(4, 30, 1, RatingKind::Like);
        repo.insert_active(&gone).await.unwrap();
        gone.soft_delete(now());
        repo.update(&gone).await.unwrap();

        let ranking = repo.most_rated(10).await.unwrap();
        let ids: Vec<i64> = ranking.iter().map(|r| r.recipe_id.value()).collect();

        assert_eq!(ids, vec![20, 10]);
    }

    #[tokio::test]
    async fn stale_update_does_not_resurrect_soft_deleted_rating() {
        let repo = InMemoryRatingRepository::new();
        let original = rating(1, 42, 3, RatingKind::Like);
        repo.insert_active(&original).await.unwrap();
        let mut remover = original.clone();
        let mut stale = original.clone();

        remover.soft_delete(now());
        repo.update(&remover).await.unwrap();
        stale.change_kind(RatingKind::Dislike).unwrap();
        let err = repo.update(&stale).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        let stored = repo.find_by_id(original.id()).await.unwrap().unwrap();
        assert!(!stored.is_active());
        assert_eq!(stored.kind(), RatingKind::Like);
        assert!(repo
            .find_active(RecipeId::new(42).unwrap(), UserId::new(3).unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn repeated_soft_delete_keeps_first_deleted_at() {
        let repo = InMemoryRatingRepository::new();
        let original = rating(1, 42, 3, RatingKind::Like);
        repo.insert_active(&original).await.unwrap();
        let mut first = original.clone();
        let mut second = original.clone();

        first.soft_delete(Timestamp::from_unix_secs(2_000).unwrap());
        repo.update(&first).await.unwrap();
        second.soft_delete(Timestamp::from_unix_secs(3_000).unwrap());
        repo.update(&second).await.unwrap();

        let stored = repo.find_by_id(original.id()).await.unwrap().unwrap();
        assert_eq!(
            stored.deleted_at(),
            Some(&Timestamp::from_unix_secs(2_000).unwrap())
        );
    }

    #[tokio::test]
    async fn update_missing_rating_is_not_found() {
        let repo = InMemoryRatingRepository::new();
        let err = repo.update(&rating(9, 1, 1, RatingKind::Like)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
