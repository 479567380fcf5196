//! PostgreSQL implementation of RatingRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use tracing::debug;

use super::{
    column, corrupt, db_error, is_unique_violation, next_sequence_value, timestamp_column,
};
use crate::domain::foundation::{DomainError, ErrorCode, RatingId, RecipeId, Timestamp, UserId};
use crate::domain::rating::{RankedRecipe, Rating, RatingKind, RatingSummary};
use crate::ports::RatingRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, recipe_id, user_id, kind, created_at, deleted_at
    FROM ratings
"#;

#[derive(Clone)]
pub struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn conflict(rating: &Rating) -> DomainError {
    DomainError::new(
        ErrorCode::RatingConflict,
        "An active rating already exists for this recipe and user",
    )
    .with_detail("recipe_id", rating.recipe_id().to_string())
    .with_detail("user_id", rating.user_id().to_string())
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn next_id(&self) -> Result<RatingId, DomainError> {
        let raw = next_sequence_value(&self.pool, "ratings_id_seq").await?;
        RatingId::new(raw).map_err(|e| corrupt("rating id", e))
    }

    async fn insert_active(&self, rating: &Rating) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO ratings (id, recipe_id, user_id, kind, created_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(rating.id().value())
        .bind(rating.recipe_id().value())
        .bind(rating.user_id().value())
        .bind(rating.kind().as_str())
        .bind(rating.created_at().as_datetime())
        .bind(rating.deleted_at().map(Timestamp::as_datetime))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                debug!(
                    recipe_id = %rating.recipe_id(),
                    user_id = %rating.user_id(),
                    "Active rating insert lost uniqueness race"
                );
                conflict(rating)
            } else {
                db_error("insert rating")(e)
            }
        })?;

        Ok(())
    }

    async fn update(&self, rating: &Rating) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE ratings SET
                kind = CASE WHEN deleted_at IS NULL THEN $2 ELSE kind END,
                deleted_at = COALESCE(deleted_at, $3)
            WHERE id = $1 AND (deleted_at IS NULL OR $3 IS NOT NULL)
            "#,
        )
        .bind(rating.id().value())
        .bind(rating.kind().as_str())
        .bind(rating.deleted_at().map(Timestamp::as_datetime))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                conflict(rating)
            } else {
                db_error("update rating")(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Rating", rating.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: RatingId) -> Result<Option<Rating>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch rating"))?;

        row.as_ref().map(row_to_rating).transpose()
    }

    async fn find_active(
        &self,
        recipe_id: RecipeId,
        user_id: UserId,
    ) -> Result<Option<Rating>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE recipe_id = $1 AND user_id = $2 AND deleted_at IS NULL",
            SELECT_COLUMNS
        ))
        .bind(recipe_id.value())
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch active rating"))?;

        row.as_ref().map(row_to_rating).transpose()
    }

    async fn find_by_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Rating>, DomainError> {
        let rows = sqlx::query(&format!("{} WHERE recipe_id = $1 ORDER BY id", SELECT_COLUMNS))
            .bind(recipe_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("fetch ratings by recipe"))?;

        rows.iter().map(row_to_rating).collect()
    }

    async fn summarize(&self, recipe_id: RecipeId) -> Result<RatingSummary, DomainError> {
        let (likes, dislikes): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FILTER (WHERE kind = 'like'),
                   COUNT(*) FILTER (WHERE kind = 'dislike')
            FROM ratings
            WHERE recipe_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(recipe_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("summarize ratings"))?;

        Ok(RatingSummary::new(likes.max(0) as u64, dislikes.max(0) as u64))
    }

    async fn most_rated(&self, limit: usize) -> Result<Vec<RankedRecipe>, DomainError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<(i64, i64, i64)> = sqlx::query_as(
            r#"
            SELECT recipe_id,
                   COUNT(*) FILTER (WHERE kind = 'like') AS likes,
                   COUNT(*) FILTER (WHERE kind = 'dislike') AS dislikes
            FROM ratings
            WHERE deleted_at IS NULL
            GROUP BY recipe_id
            ORDER BY (COUNT(*) FILTER (WHERE kind = 'like')
                      - COUNT(*) FILTER (WHERE kind = 'dislike')) DESC,
                     recipe_id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("rank recipes"))?;

        rows.into_iter()
            .map(|(recipe_id, likes, dislikes)| {
                Ok(RankedRecipe {
                    recipe_id: RecipeId::new(recipe_id).map_err(|e| corrupt("recipe id", e))?,
                    summary: RatingSummary::new(likes.max(0) as u64, dislikes.max(0) as u64),
                })
            })
            .collect()
    }
}

fn row_to_rating(row: &PgRow) -> Result<Rating, DomainError> {
    let id: i64 = column(row, "id")?;
    let recipe_id: i64 = column(row, "recipe_id")?;
    let user_id: i64 = column(row, "user_id")?;
    let kind: String = column(row, "kind")?;
    let deleted_at: Option<chrono::DateTime<chrono::Utc>> = column(row, "deleted_at")?;

    Ok(Rating::reconstitute(
        RatingId::new(id).map_err(|e| corrupt("rating id", e))?,
        RecipeId::new(recipe_id).map_err(|e| corrupt("recipe id", e))?,
        UserId::new(user_id).map_err(|e| corrupt("user id", e))?,
        kind.parse::<RatingKind>().map_err(|e| corrupt("rating kind", e))?,
        timestamp_column(row, "created_at")?,
        deleted_at.map(Timestamp::from_datetime),
    ))
}
