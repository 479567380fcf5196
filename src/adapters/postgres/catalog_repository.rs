//! PostgreSQL implementation of CatalogRepository for ingredients and utensils.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use std::marker::PhantomData;

use super::{column, corrupt, db_error, next_sequence_value, timestamp_column};
use crate::domain::catalog::{CatalogId, CatalogItem};
use crate::domain::foundation::{DomainError, IngredientId, Repository, UtensilId};
use crate::ports::CatalogRepository;

/// Maps a catalog id type to its table. Names are compile-time constants,
/// never caller input, so they may be spliced into SQL text.
pub trait CatalogTable: CatalogId {
    const TABLE: &'static str;
    const SEQUENCE: &'static str;
}

impl CatalogTable for IngredientId {
    const TABLE: &'static str = "ingredients";
    const SEQUENCE: &'static str = "ingredients_id_seq";
}

impl CatalogTable for UtensilId {
    const TABLE: &'static str = "utensils";
    const SEQUENCE: &'static str = "utensils_id_seq";
}

#[derive(Clone)]
pub struct PostgresCatalogRepository<Id: CatalogTable> {
    pool: PgPool,
    _id: PhantomData<fn() -> Id>,
}

impl<Id: CatalogTable> PostgresCatalogRepository<Id> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _id: PhantomData,
        }
    }
}

#[async_trait]
impl<Id: CatalogTable> Repository<CatalogItem<Id>, Id> for PostgresCatalogRepository<Id> {
    async fn find_by_id(&self, id: Id) -> Result<Option<CatalogItem<Id>>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT id, name, kind, created_at, updated_at FROM {} WHERE id = $1",
            Id::TABLE
        ))
        .bind(id.raw())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch catalog item"))?;

        row.as_ref().map(row_to_item::<Id>).transpose()
    }

    async fn save(&self, item: &CatalogItem<Id>) -> Result<(), DomainError> {
        sqlx::query(&format!(
            "INSERT INTO {} (id, name, kind, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
            Id::TABLE
        ))
        .bind(item.id().raw())
        .bind(item.name())
        .bind(item.kind())
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert catalog item"))?;

        Ok(())
    }

    async fn update(&self, item: &CatalogItem<Id>) -> Result<(), DomainError> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET name = $2, kind = $3, updated_at = $4 WHERE id = $1",
            Id::TABLE
        ))
        .bind(item.id().raw())
        .bind(item.name())
        .bind(item.kind())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update catalog item"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(Id::RESOURCE_TYPE, item.id()));
        }
        Ok(())
    }

    async fn delete(&self, id: Id) -> Result<(), DomainError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", Id::TABLE))
            .bind(id.raw())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete catalog item"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(Id::RESOURCE_TYPE, id));
        }
        Ok(())
    }
}

#[async_trait]
impl<Id: CatalogTable> CatalogRepository<Id> for PostgresCatalogRepository<Id> {
    async fn next_id(&self) -> Result<Id, DomainError> {
        let raw = next_sequence_value(&self.pool, Id::SEQUENCE).await?;
        Id::from_raw(raw).map_err(|e| corrupt("catalog id", e))
    }

    async fn list_all(&self) -> Result<Vec<CatalogItem<Id>>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT id, name, kind, created_at, updated_at FROM {} ORDER BY name, id",
            Id::TABLE
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list catalog items"))?;

        rows.iter().map(row_to_item::<Id>).collect()
    }
}

fn row_to_item<Id: CatalogId>(row: &PgRow) -> Result<CatalogItem<Id>, DomainError> {
    let id: i64 = column(row, "id")?;

    Ok(CatalogItem::reconstitute(
        Id::from_raw(id).map_err(|e| corrupt("catalog id", e))?,
        column(row, "name")?,
        column(row, "kind")?,
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
    ))
}
