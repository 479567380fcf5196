use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{poisoned, IdSequence};
use crate::domain::catalog::{CatalogId, CatalogItem};
use crate::domain::foundation::{DomainError, ErrorCode, Repository};
use crate::ports::CatalogRepository;

/// Catalog store shared by ingredients and utensils.
#[derive(Debug)]
pub struct InMemoryCatalogRepository<Id: CatalogId> {
    items: RwLock<BTreeMap<Id, CatalogItem<Id>>>,
    ids: IdSequence,
}

impl<Id: CatalogId> InMemoryCatalogRepository<Id> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            ids: IdSequence::new(),
        }
    }
}

impl<Id: CatalogId> Default for InMemoryCatalogRepository<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<Id: CatalogId> Repository<CatalogItem<Id>, Id> for InMemoryCatalogRepository<Id> {
    async fn find_by_id(&self, id: Id) -> Result<Option<CatalogItem<Id>>, DomainError> {
        Ok(self.items.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn save(&self, item: &CatalogItem<Id>) -> Result<(), DomainError> {
        let mut items = self.items.write().map_err(poisoned)?;
        if items.contains_key(&item.id()) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("{} already exists: {}", Id::RESOURCE_TYPE, item.id()),
            ));
        }
        self.ids.observe(item.id().raw());
        items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &CatalogItem<Id>) -> Result<(), DomainError> {
        let mut items = self.items.write().map_err(poisoned)?;
        match items.get_mut(&item.id()) {
            Some(slot) => {
                *slot = item.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(Id::RESOURCE_TYPE, item.id())),
        }
    }

    async fn delete(&self, id: Id) -> Result<(), DomainError> {
        let mut items = self.items.write().map_err(poisoned)?;
        items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(Id::RESOURCE_TYPE, id))
    }
}

#[async_trait]
impl<Id: CatalogId> CatalogRepository<Id> for InMemoryCatalogRepository<Id> {
    async fn next_id(&self) -> Result<Id, DomainError> {
        Ok(Id::from_raw(self.ids.next())?)
    }

    async fn list_all(&self) -> Result<Vec<CatalogItem<Id>>, DomainError> {
        let items = self.items.read().map_err(poisoned)?;
        let mut all: Vec<CatalogItem<Id>> = items.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(all)
    }
}
