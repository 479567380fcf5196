//! Catalog domain module: ingredients and utensils managed by administrators.

mod item;

pub use item::{CatalogId, CatalogItem, Ingredient, Utensil, MAX_CATALOG_FIELD_LENGTH};
