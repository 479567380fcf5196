//! In-memory recipe store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{poisoned, IdSequence};
use crate::domain::foundation::{DomainError, ErrorCode, RecipeId, Repository, UserId};
use crate::domain::recipe::Recipe;
use crate::ports::RecipeRepository;

#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: RwLock<BTreeMap<RecipeId, Recipe>>,
    ids: IdSequence,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.recipes.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Repository<Recipe, RecipeId> for InMemoryRecipeRepository {
    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, DomainError> {
        Ok(self.recipes.read().map_err(poisoned)?.get(&id).cloned())
    }

    async fn save(&self, recipe: &Recipe) -> Result<(), DomainError> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        if recipes.contains_key(&recipe.id()) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Recipe already exists: {}", recipe.id()),
            ));
        }
        self.ids.observe(recipe.id().value());
        recipes.insert(recipe.id(), recipe.clone());
        Ok(())
    }

    async fn update(&self, recipe: &Recipe) -> Result<(), DomainError> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        match recipes.get_mut(&recipe.id()) {
            Some(slot) => {
                *slot = recipe.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Recipe", recipe.id())),
        }
    }

    async fn delete(&self, id: RecipeId) -> Result<(), DomainError> {
        let mut recipes = self.recipes.write().map_err(poisoned)?;
        recipes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Recipe", id))
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn next_id(&self) -> Result<RecipeId, DomainError> {
        Ok(RecipeId::new(self.ids.next())?)
    }

    async fn find_by_author(&self, author: UserId) -> Result<Vec<Recipe>, DomainError> {
        let recipes = self.recipes.read().map_err(poisoned)?;
        let mut found: Vec<Recipe> = recipes
            .values()
            .filter(|r| r.author_id() == author)
            .cloned()
            .collect();
        found.sort_by_key(|r| (*r.created_at(), r.id()));
        Ok(found)
    }
}
