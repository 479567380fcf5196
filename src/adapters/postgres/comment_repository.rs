//! PostgreSQL implementation of CommentRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, corrupt, db_error, next_sequence_value, timestamp_column};
use crate::domain::comment::{Comment, CommentStatus};
use crate::domain::foundation::{CommentId, DomainError, RecipeId, UserId};
use crate::ports::CommentRepository;

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn next_id(&self) -> Result<CommentId, DomainError> {
        let raw = next_sequence_value(&self.pool, "comments_id_seq").await?;
        CommentId::new(raw).map_err(|e| corrupt("comment id", e))
    }

    async fn save(&self, comment: &Comment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, recipe_id, author_id, body, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(comment.id().value())
        .bind(comment.recipe_id().value())
        .bind(comment.author_id().value())
        .bind(comment.body())
        .bind(comment.status().as_str())
        .bind(comment.created_at().as_datetime())
        .bind(comment.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert comment"))?;

        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE comments SET
                body = $2,
                status = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(comment.id().value())
        .bind(comment.body())
        .bind(comment.status().as_str())
        .bind(comment.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update comment"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Comment", comment.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, recipe_id, author_id, body, status, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch comment"))?;

        row.as_ref().map(row_to_comment).transpose()
    }

    async fn find_active_by_recipe(&self, recipe_id: RecipeId) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, recipe_id, author_id, body, status, created_at, updated_at
            FROM comments
            WHERE recipe_id = $1 AND status = 'active'
            ORDER BY created_at, id
            "#,
        )
        .bind(recipe_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch comments by recipe"))?;

        rows.iter().map(row_to_comment).collect()
    }
}

fn row_to_comment(row: &PgRow) -> Result<Comment, DomainError> {
    let id: i64 = column(row, "id")?;
    let recipe_id: i64 = column(row, "recipe_id")?;
    let author_id: i64 = column(row, "author_id")?;
    let status: String = column(row, "status")?;

    Ok(Comment::reconstitute(
        CommentId::new(id).map_err(|e| corrupt("comment id", e))?,
        RecipeId::new(recipe_id).map_err(|e| corrupt("recipe id", e))?,
        UserId::new(author_id).map_err(|e| corrupt("author id", e))?,
        column(row, "body")?,
        CommentStatus::parse(&status).ok_or_else(|| corrupt("comment status", &status))?,
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
    ))
}
