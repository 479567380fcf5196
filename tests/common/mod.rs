//! In-memory wiring shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use secrecy::SecretString;

use recipe_share::adapters::auth::{Argon2Hasher, HmacJwtCodec};
use recipe_share::adapters::clock::FixedClock;
use recipe_share::adapters::memory::{
    InMemoryAccountRepository, InMemoryCatalogRepository, InMemoryCommentRepository,
    InMemoryRatingRepository, InMemoryRecipeRepository,
};
use recipe_share::application::{Services, Stores, TokenService, TokenWindow};
use recipe_share::domain::foundation::{
    IngredientId, Principal, RecipeId, Repository, Role, Timestamp, UserId, UtensilId,
};
use recipe_share::domain::recipe::{NewRecipe, Recipe};
use recipe_share::ports::Clock;

pub const ISSUER: &str = "recipe-share";
pub const SECRET: &str = "integration-secret-with-at-least-32-bytes";

pub struct App {
    pub services: Services,
    pub clock: Arc<FixedClock>,
    pub recipes: Arc<InMemoryRecipeRepository>,
    pub ratings: Arc<InMemoryRatingRepository>,
}

impl App {
    pub fn new() -> Self {
        let clock = Arc::new(FixedClock::new(
            Timestamp::from_unix_secs(1_700_000_000).unwrap(),
        ));
        let recipes = Arc::new(InMemoryRecipeRepository::new());
        let ratings = Arc::new(InMemoryRatingRepository::new());
        let stores = Stores {
            accounts: Arc::new(InMemoryAccountRepository::new()),
            recipes: recipes.clone(),
            ratings: ratings.clone(),
            comments: Arc::new(InMemoryCommentRepository::new()),
            ingredients: Arc::new(InMemoryCatalogRepository::<IngredientId>::new()),
            utensils: Arc::new(InMemoryCatalogRepository::<UtensilId>::new()),
        };
        let codec = Arc::new(HmacJwtCodec::new(
            &SecretString::new(SECRET.to_string()),
            ISSUER,
        ));
        let tokens = Arc::new(TokenService::new(
            codec,
            clock.clone(),
            ISSUER,
            TokenWindow::from_minutes(30).unwrap(),
        ));
        let hasher = Arc::new(Argon2Hasher::new(1024, 1, 1).unwrap());
        let services = Services::new(stores, hasher, tokens, clock.clone());

        Self {
            services,
            clock,
            recipes,
            ratings,
        }
    }

    /// Stores a recipe with a caller-chosen id.
    pub async fn seed_recipe(&self, id: i64, author: i64) -> Recipe {
        let recipe = Recipe::create(
            RecipeId::new(id).unwrap(),
            UserId::new(author).unwrap(),
            NewRecipe {
                name: "Shakshuka".to_string(),
                prep_time_minutes: Some(25),
                servings: Some(2),
                ..NewRecipe::default()
            },
            self.clock.now(),
        )
        .unwrap();
        self.recipes.save(&recipe).await.unwrap();
        recipe
    }

    pub fn active_ratings_for(&self, recipe: RecipeId, user: UserId) -> usize {
        self.ratings
            .all()
            .iter()
            .filter(|r| r.recipe_id() == recipe && r.user_id() == user && r.is_active())
            .count()
    }

    pub fn rows_for(&self, recipe: RecipeId, user: UserId) -> usize {
        self.ratings
            .all()
            .iter()
            .filter(|r| r.recipe_id() == recipe && r.user_id() == user)
            .count()
    }
}

pub fn user(id: i64) -> Principal {
    Principal::new(UserId::new(id).unwrap(), [Role::User])
}

pub fn admin(id: i64) -> Principal {
    Principal::new(UserId::new(id).unwrap(), [Role::Admin])
}
