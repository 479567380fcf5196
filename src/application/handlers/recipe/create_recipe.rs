//! CreateRecipeHandler - Command handler for creating recipes.

use std::sync::Arc;
use tracing::info;

use crate::domain::foundation::{DomainError, Principal, Repository};
use crate::domain::recipe::{NewRecipe, Recipe};
use crate::ports::{Clock, RecipeRepository};

/// Command to create a recipe authored by the calling principal.
#[derive(Debug, Clone)]
pub struct CreateRecipeCommand {
    pub principal: Principal,
    pub recipe: NewRecipe,
}

/// Result of successful recipe creation.
#[derive(Debug, Clone)]
pub struct CreateRecipeResult {
    pub recipe: Recipe,
}

/// Handler for creating recipes.
pub struct CreateRecipeHandler {
    recipes: Arc<dyn RecipeRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRecipeHandler {
    pub fn new(recipes: Arc<dyn RecipeRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { recipes, clock }
    }

    pub async fn handle(&self, cmd: CreateRecipeCommand) -> Result<CreateRecipeResult, DomainError> {
        // 1. Allocate id
        let id = self.recipes.next_id().await?;

        // 2. Validate and build the aggregate; the author is always the caller
        let recipe = Recipe::create(id, cmd.principal.id, cmd.recipe, self.clock.now())?;

        // 3. Persist
        self.recipes.save(&recipe).await?;

        info!(recipe_id = %recipe.id(), author_id = %recipe.author_id(), "Recipe created");

        Ok(CreateRecipeResult { recipe })
    }
}
