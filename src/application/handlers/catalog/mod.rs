//! Catalog handlers (ingredients and utensils).

mod manage_catalog;

pub use manage_catalog::{
    CatalogHandler, CreateCatalogItemCommand, DeleteCatalogItemCommand, UpdateCatalogItemCommand,
};
