//! UpdateRecipeHandler - Command handler for partial recipe updates.

use std::sync::Arc;
use tracing::info;

use crate::application::authorization::enforce;
use crate::domain::foundation::{check_mutation, DomainError, Principal, RecipeId, Repository};
use crate::domain::recipe::{Recipe, RecipeChanges};
use crate::ports::{Clock, RecipeRepository};

/// Command to update a recipe's details.
#[derive(Debug, Clone)]
pub struct UpdateRecipeCommand {
    pub principal: Principal,
    pub recipe_id: RecipeId,
    pub changes: RecipeChanges,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateRecipeResult {
    pub recipe: Recipe,
}

/// Handler for updating recipes.
pub struct UpdateRecipeHandler {
    recipes: Arc<dyn RecipeRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateRecipeHandler {
    pub fn new(recipes: Arc<dyn RecipeRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { recipes, clock }
    }

    /// # Errors
    ///
    /// - `NotFound` if the recipe does not exist
    /// - `Forbidden` if the caller is neither the author nor an admin
    pub async fn handle(&self, cmd: UpdateRecipeCommand) -> Result<UpdateRecipeResult, DomainError> {
        // 1. Load
        let mut recipe = self
            .recipes
            .find_by_id(cmd.recipe_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Recipe", cmd.recipe_id))?;

        // 2. Authorize
        enforce("update_recipe", check_mutation(&recipe, &cmd.principal))?;

        // 3. Apply
        recipe.update_details(cmd.changes, self.clock.now());

        // 4. Persist
        self.recipes.update(&recipe).await?;

        info!(recipe_id = %recipe.id(), user_id = %cmd.principal.id, "Recipe updated");

        Ok(UpdateRecipeResult { recipe })
    }
}
