//! Admin-managed catalog entries (ingredients and utensils).
//!
//! Both catalogs share one shape, a name plus a free-form kind, so a
//! single generic entity serves both, keyed by its own identifier type.

use crate::domain::foundation::{
    DomainError, IngredientId, Timestamp, UtensilId, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Maximum length for catalog name and kind.
pub const MAX_CATALOG_FIELD_LENGTH: usize = 100;

/// Identifier types usable as catalog keys.
pub trait CatalogId: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// The type name for authorization logs ("Ingredient", "Utensil").
    const RESOURCE_TYPE: &'static str;

    fn from_raw(value: i64) -> Result<Self, ValidationError>;

    fn raw(&self) -> i64;
}

impl CatalogId for IngredientId {
    const RESOURCE_TYPE: &'static str = "Ingredient";

    fn from_raw(value: i64) -> Result<Self, ValidationError> {
        IngredientId::new(value)
    }

    fn raw(&self) -> i64 {
        self.value()
    }
}

impl CatalogId for UtensilId {
    const RESOURCE_TYPE: &'static str = "Utensil";

    fn from_raw(value: i64) -> Result<Self, ValidationError> {
        UtensilId::new(value)
    }

    fn raw(&self) -> i64 {
        self.value()
    }
}

/// A named catalog entry with a kind (e.g. "dairy", "cookware").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem<Id> {
    id: Id,
    name: String,
    kind: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

pub type Ingredient = CatalogItem<IngredientId>;
pub type Utensil = CatalogItem<UtensilId>;

impl<Id: CatalogId> CatalogItem<Id> {
    /// # Errors
    ///
    /// - `ValidationFailed` if name or kind is blank or too long
    pub fn new(id: Id, name: &str, kind: &str, now: Timestamp) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            name: validate_field("name", name)?,
            kind: validate_field("kind", kind)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstitute(
        id: Id,
        name: String,
        kind: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Partial update; blank or invalid values are ignored.
    pub fn update_details(&mut self, name: Option<&str>, kind: Option<&str>, now: Timestamp) {
        if let Some(name) = name.and_then(|n| validate_field("name", n).ok()) {
            self.name = name;
        }
        if let Some(kind) = kind.and_then(|k| validate_field("kind", k).ok()) {
            self.kind = kind;
        }
        self.updated_at = now;
    }
}

fn validate_field(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if trimmed.chars().count() > MAX_CATALOG_FIELD_LENGTH {
        return Err(ValidationError::too_long(field, MAX_CATALOG_FIELD_LENGTH));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn t(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs).unwrap()
    }

    #[test]
    fn new_ingredient_trims_fields() {
        let item = Ingredient::new(IngredientId::new(1).unwrap(), " Flour ", "baking", t(0)).unwrap();
        assert_eq!(item.name(), "Flour");
        assert_eq!(item.kind(), "baking");
    }

    #[test]
    fn new_rejects_blank_kind() {
        let err = Utensil::new(UtensilId::new(1).unwrap(), "Whisk", "", t(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"kind".to_string()));
    }

    #[test]
    fn update_details_is_partial() {
        let mut item = Utensil::new(UtensilId::new(2).unwrap(), "Whisk", "tool", t(0)).unwrap();

        item.update_details(None, Some("  "), t(5));
        assert_eq!(item.kind(), "tool");

        item.update_details(Some("Balloon whisk"), None, t(6));
        assert_eq!(item.name(), "Balloon whisk");
        assert_eq!(item.updated_at(), &t(6));
    }

    #[test]
    fn resource_types_are_distinct() {
        assert_eq!(<IngredientId as CatalogId>::RESOURCE_TYPE, "Ingredient");
        assert_eq!(<UtensilId as CatalogId>::RESOURCE_TYPE, "Utensil");
    }
}
