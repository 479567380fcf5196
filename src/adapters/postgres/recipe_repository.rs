//! PostgreSQL implementation of RecipeRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, corrupt, db_error, next_sequence_value, timestamp_column};
use crate::domain::foundation::{DomainError, RecipeId, Repository, UserId};
use crate::domain::recipe::Recipe;
use crate::ports::RecipeRepository;

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, prep_time_minutes, servings, difficulty, body, category,
           author_id, created_at, updated_at
    FROM recipes
"#;

#[derive(Clone)]
pub struct PostgresRecipeRepository {
    pool: PgPool,
}

impl PostgresRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Recipe, RecipeId> for PostgresRecipeRepository {
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch recipe"))?;

        row.as_ref().map(row_to_recipe).transpose()
    }

    async fn save(&self, recipe: &Recipe) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO recipes (
                id, name, prep_time_minutes, servings, difficulty, body, category,
                author_id, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(recipe.id().value())
        .bind(recipe.name())
        .bind(recipe.prep_time_minutes())
        .bind(recipe.servings())
        .bind(recipe.difficulty())
        .bind(recipe.body())
        .bind(recipe.category())
        .bind(recipe.author_id().value())
        .bind(recipe.created_at().as_datetime())
        .bind(recipe.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert recipe"))?;

        Ok(())
    }

    async fn update(&self, recipe: &Recipe) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE recipes SET
                name = $2,
                prep_time_minutes = $3,
                servings = $4,
                difficulty = $5,
                body = $6,
                category = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(recipe.id().value())
        .bind(recipe.name())
        .bind(recipe.prep_time_minutes())
        .bind(recipe.servings())
        .bind(recipe.difficulty())
        .bind(recipe.body())
        .bind(recipe.category())
        .bind(recipe.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update recipe"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Recipe", recipe.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: RecipeId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete recipe"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Recipe", id));
        }
        Ok(())
    }

    async fn exists(&self, id: RecipeId) -> Result<bool, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes WHERE id = $1")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check recipe existence"))?;

        Ok(count > 0)
    }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    async fn next_id(&self) -> Result<RecipeId, DomainError> {
        let raw = next_sequence_value(&self.pool, "recipes_id_seq").await?;
        RecipeId::new(raw).map_err(|e| corrupt("recipe id", e))
    }

    async fn find_by_author(&self, author: UserId) -> Result<Vec<Recipe>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE author_id = $1 ORDER BY created_at, id",
            SELECT_COLUMNS
        ))
        .bind(author.value())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch recipes by author"))?;

        rows.iter().map(row_to_recipe).collect()
    }
}

fn row_to_recipe(row: &PgRow) -> Result<Recipe, DomainError> {
    let id: i64 = column(row, "id")?;
    let author_id: i64 = column(row, "author_id")?;

    Ok(Recipe::reconstitute(
        RecipeId::new(id).map_err(|e| corrupt("recipe id", e))?,
        column(row, "name")?,
        column(row, "prep_time_minutes")?,
        column(row, "servings")?,
        column(row, "difficulty")?,
        column(row, "body")?,
        column(row, "category")?,
        UserId::new(author_id).map_err(|e| corrupt("author id", e))?,
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
    ))
}
