//! Catalog repository port, shared by ingredients and utensils.

use async_trait::async_trait;

use crate::domain::catalog::{CatalogId, CatalogItem};
use crate::domain::foundation::{DomainError, Repository};

#[async_trait]
pub trait CatalogRepository<Id: CatalogId>: Repository<CatalogItem<Id>, Id> {
    async fn next_id(&self) -> Result<Id, DomainError>;

    /// All entries ordered by name.
    async fn list_all(&self) -> Result<Vec<CatalogItem<Id>>, DomainError>;
}
