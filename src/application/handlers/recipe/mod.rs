//! Recipe handlers.

mod create_recipe;
mod delete_recipe;
mod update_recipe;

pub use create_recipe::{CreateRecipeCommand, CreateRecipeHandler, CreateRecipeResult};
pub use delete_recipe::{DeleteRecipeCommand, DeleteRecipeHandler};
pub use update_recipe::{UpdateRecipeCommand, UpdateRecipeHandler, UpdateRecipeResult};
