//! Handler wiring.
//!
//! `Services` owns one instance of every handler, built from a set of
//! stores and the shared identity collaborators. The binary builds it over
//! PostgreSQL; tests build it over the in-memory stores.

use std::sync::Arc;

use super::handlers::*;
use super::token_service::TokenService;
use crate::domain::foundation::{IngredientId, UtensilId};
use crate::ports::{
    AccountRepository, CatalogRepository, Clock, CommentRepository, PasswordHasher,
    RatingRepository, RecipeRepository,
};

/// Persistence ports a `Services` instance is built over.
#[derive(Clone)]
pub struct Stores {
    pub accounts: Arc<dyn AccountRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub ratings: Arc<dyn RatingRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub ingredients: Arc<dyn CatalogRepository<IngredientId>>,
    pub utensils: Arc<dyn CatalogRepository<UtensilId>>,
}

pub struct Services {
    pub tokens: Arc<TokenService>,

    pub register_account: RegisterAccountHandler,
    pub authenticate: AuthenticateHandler,
    pub refresh_token: RefreshTokenHandler,

    pub create_recipe: CreateRecipeHandler,
    pub update_recipe: UpdateRecipeHandler,
    pub delete_recipe: DeleteRecipeHandler,

    pub rate_recipe: RateRecipeHandler,
    pub remove_rating: RemoveRatingHandler,
    pub rating_summary: GetRatingSummaryHandler,
    pub user_rating: GetUserRatingHandler,
    pub most_rated: MostRatedHandler,

    pub add_comment: AddCommentHandler,
    pub edit_comment: EditCommentHandler,
    pub deactivate_comment: DeactivateCommentHandler,
    pub list_comments: ListActiveCommentsHandler,

    pub ingredients: CatalogHandler<IngredientId>,
    pub utensils: CatalogHandler<UtensilId>,
}

impl Services {
    pub fn new(
        stores: Stores,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let Stores {
            accounts,
            recipes,
            ratings,
            comments,
            ingredients,
            utensils,
        } = stores;

        Self {
            register_account: RegisterAccountHandler::new(
                accounts.clone(),
                hasher.clone(),
                clock.clone(),
            ),
            authenticate: AuthenticateHandler::new(accounts.clone(), hasher, tokens.clone()),
            refresh_token: RefreshTokenHandler::new(accounts, tokens.clone()),

            create_recipe: CreateRecipeHandler::new(recipes.clone(), clock.clone()),
            update_recipe: UpdateRecipeHandler::new(recipes.clone(), clock.clone()),
            delete_recipe: DeleteRecipeHandler::new(recipes.clone()),

            rate_recipe: RateRecipeHandler::new(recipes.clone(), ratings.clone(), clock.clone()),
            remove_rating: RemoveRatingHandler::new(ratings.clone(), clock.clone()),
            rating_summary: GetRatingSummaryHandler::new(recipes.clone(), ratings.clone()),
            user_rating: GetUserRatingHandler::new(ratings.clone()),
            most_rated: MostRatedHandler::new(ratings),

            add_comment: AddCommentHandler::new(recipes, comments.clone(), clock.clone()),
            edit_comment: EditCommentHandler::new(comments.clone(), clock.clone()),
            deactivate_comment: DeactivateCommentHandler::new(comments.clone(), clock.clone()),
            list_comments: ListActiveCommentsHandler::new(comments),

            ingredients: CatalogHandler::new(ingredients, clock.clone()),
            utensils: CatalogHandler::new(utensils, clock),

            tokens,
        }
    }
}
