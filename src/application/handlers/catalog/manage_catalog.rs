//! CatalogHandler - Admin-only management of ingredients and utensils.
//!
//! One generic handler serves both catalogs; the id type selects the store
//! and the resource name used in authorization logs.

use std::sync::Arc;
use tracing::info;

use crate::application::authorization::enforce;
use crate::domain::catalog::{CatalogId, CatalogItem};
use crate::domain::foundation::{require_admin, DomainError, Principal};
use crate::ports::{CatalogRepository, Clock};

#[derive(Debug, Clone)]
pub struct CreateCatalogItemCommand {
    pub principal: Principal,
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Clone)]
pub struct UpdateCatalogItemCommand<Id> {
    pub principal: Principal,
    pub id: Id,
    pub name: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeleteCatalogItemCommand<Id> {
    pub principal: Principal,
    pub id: Id,
}

pub struct CatalogHandler<Id: CatalogId> {
    items: Arc<dyn CatalogRepository<Id>>,
    clock: Arc<dyn Clock>,
}

impl<Id: CatalogId> CatalogHandler<Id> {
    pub fn new(items: Arc<dyn CatalogRepository<Id>>, clock: Arc<dyn Clock>) -> Self {
        Self { items, clock }
    }

    /// # Errors
    ///
    /// - `Forbidden` for non-admins
    /// - `ValidationFailed` if name or kind is blank or too long
    pub async fn create(&self, cmd: CreateCatalogItemCommand) -> Result<CatalogItem<Id>, DomainError> {
        enforce(
            "create_catalog_item",
            require_admin(&cmd.principal, Id::RESOURCE_TYPE, "new"),
        )?;

        let id = self.items.next_id().await?;
        let item = CatalogItem::new(id, &cmd.name, &cmd.kind, self.clock.now())?;
        self.items.save(&item).await?;

        info!(resource_type = Id::RESOURCE_TYPE, id = %item.id(), "Catalog item created");
        Ok(item)
    }

    /// # Errors
    ///
    /// - `Forbidden` for non-admins
    /// - `NotFound` if the item does not exist
    pub async fn update(
        &self,
        cmd: UpdateCatalogItemCommand<Id>,
    ) -> Result<CatalogItem<Id>, DomainError> {
        enforce(
            "update_catalog_item",
            require_admin(&cmd.principal, Id::RESOURCE_TYPE, cmd.id.to_string()),
        )?;

        let mut item = self
            .items
            .find_by_id(cmd.id)
            .await?
            .ok_or_else(|| DomainError::not_found(Id::RESOURCE_TYPE, cmd.id))?;
        item.update_details(cmd.name.as_deref(), cmd.kind.as_deref(), self.clock.now());
        self.items.update(&item).await?;

        info!(resource_type = Id::RESOURCE_TYPE, id = %item.id(), "Catalog item updated");
        Ok(item)
    }

    /// # Errors
    ///
    /// - `Forbidden` for non-admins
    /// - `NotFound` if the item does not exist
    pub async fn delete(&self, cmd: DeleteCatalogItemCommand<Id>) -> Result<(), DomainError> {
        enforce(
            "delete_catalog_item",
            require_admin(&cmd.principal, Id::RESOURCE_TYPE, cmd.id.to_string()),
        )?;

        self.items.delete(cmd.id).await?;

        info!(resource_type = Id::RESOURCE_TYPE, id = %cmd.id, "Catalog item deleted");
        Ok(())
    }

    /// Lists every entry ordered by name. Open to any caller.
    pub async fn list(&self) -> Result<Vec<CatalogItem<Id>>, DomainError> {
        self.items.list_all().await
    }
}
