//! Recipe domain module.
//!
//! Recipes carry an immutable author. Edit and delete are gated by the
//! shared mutation policy (author or admin).

mod aggregate;

pub use aggregate::{
    NewRecipe, Recipe, RecipeChanges, MAX_NAME_LENGTH, QUICK_RECIPE_MAX_MINUTES,
};
