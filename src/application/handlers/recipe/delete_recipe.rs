//! DeleteRecipeHandler - Command handler for removing recipes.

use std::sync::Arc;
use tracing::info;

use crate::application::authorization::enforce;
use crate::domain::foundation::{check_mutation, DomainError, Principal, RecipeId, Repository};
use crate::ports::RecipeRepository;

/// Command to delete a recipe.
#[derive(Debug, Clone)]
pub struct DeleteRecipeCommand {
    pub principal: Principal,
    pub recipe_id: RecipeId,
}

/// Handler for deleting recipes.
pub struct DeleteRecipeHandler {
    recipes: Arc<dyn RecipeRepository>,
}

impl DeleteRecipeHandler {
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }

    /// # Errors
    ///
    /// - `NotFound` if the recipe does not exist
    /// - `Forbidden` if the caller is neither the author nor an admin
    pub async fn handle(&self, cmd: DeleteRecipeCommand) -> Result<(), DomainError> {
        let recipe = self
            .recipes
            .find_by_id(cmd.recipe_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Recipe", cmd.recipe_id))?;

        enforce("delete_recipe", check_mutation(&recipe, &cmd.principal))?;

        self.recipes.delete(recipe.id()).await?;

        info!(
            recipe_id = %recipe.id(),
            user_id = %cmd.principal.id,
            by_admin = cmd.principal.is_admin(),
            "Recipe deleted"
        );

        Ok(())
    }
}
