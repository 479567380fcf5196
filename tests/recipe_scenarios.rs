//! End-to-end flows through the application services over in-memory stores.

mod common;

use std::sync::Arc;

use chrono::Duration;

use common::{admin, user, App};
use recipe_share::adapters::auth::MockSessionValidator;
use recipe_share::application::{
    AuthenticateCommand, CreateRecipeCommand, DeleteRecipeCommand, GetRatingSummaryQuery,
    GetUserRatingQuery, MostRatedQuery, RateOutcome, RateRecipeCommand, RegisterAccountCommand,
    RemoveRatingCommand, UpdateRecipeCommand,
};
use recipe_share::domain::foundation::{
    AuthError, ErrorCode, RecipeId, Repository, Role, UserId,
};
use recipe_share::domain::rating::{RatingKind, RatingSummary};
use recipe_share::domain::recipe::{NewRecipe, RecipeChanges};
use recipe_share::ports::SessionValidator;

fn rate(principal: i64, recipe: i64, kind: RatingKind) -> RateRecipeCommand {
    RateRecipeCommand {
        principal: user(principal),
        recipe_id: RecipeId::new(recipe).unwrap(),
        kind,
    }
}

async fn summary(app: &App, recipe: i64) -> RatingSummary {
    app.services
        .rating_summary
        .handle(GetRatingSummaryQuery {
            recipe_id: RecipeId::new(recipe).unwrap(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn non_author_cannot_update_recipe() {
    let app = App::new();
    let created = app
        .services
        .create_recipe
        .handle(CreateRecipeCommand {
            principal: user(7),
            recipe: NewRecipe {
                name: "Ratatouille".to_string(),
                ..NewRecipe::default()
            },
        })
        .await
        .unwrap()
        .recipe;
    assert_eq!(created.author_id(), UserId::new(7).unwrap());

    let err = app
        .services
        .update_recipe
        .handle(UpdateRecipeCommand {
            principal: user(9),
            recipe_id: created.id(),
            changes: RecipeChanges {
                name: Some("Stolen".to_string()),
                ..RecipeChanges::default()
            },
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Forbidden);
    let stored = app.recipes.find_by_id(created.id()).await.unwrap().unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn admin_deletes_any_recipe() {
    let app = App::new();
    let recipe = app.seed_recipe(5, 7).await;

    app.services
        .delete_recipe
        .handle(DeleteRecipeCommand {
            principal: admin(99),
            recipe_id: recipe.id(),
        })
        .await
        .unwrap();

    assert!(!app.recipes.exists(recipe.id()).await.unwrap());
}

#[tokio::test]
async fn rating_twice_keeps_one_active_row() {
    let app = App::new();
    app.seed_recipe(42, 7).await;

    let first = app.services.rate_recipe.handle(rate(3, 42, RatingKind::Like)).await.unwrap();
    let second = app.services.rate_recipe.handle(rate(3, 42, RatingKind::Like)).await.unwrap();

    assert_eq!(first.outcome, RateOutcome::Created);
    assert_eq!(second.outcome, RateOutcome::Unchanged);
    assert_eq!(first.rating.id(), second.rating.id());
    assert_eq!(summary(&app, 42).await, RatingSummary::new(1, 0));
    assert_eq!(
        app.active_ratings_for(RecipeId::new(42).unwrap(), UserId::new(3).unwrap()),
        1
    );
}

#[tokio::test]
async fn changing_kind_reuses_the_row() {
    let app = App::new();
    app.seed_recipe(42, 7).await;

    app.services.rate_recipe.handle(rate(3, 42, RatingKind::Like)).await.unwrap();
    let changed = app
        .services
        .rate_recipe
        .handle(rate(3, 42, RatingKind::Dislike))
        .await
        .unwrap();

    assert_eq!(changed.outcome, RateOutcome::Changed);
    assert_eq!(summary(&app, 42).await, RatingSummary::new(0, 1));
    assert_eq!(app.rows_for(RecipeId::new(42).unwrap(), UserId::new(3).unwrap()), 1);

    let kind = app
        .services
        .user_rating
        .handle(GetUserRatingQuery {
            recipe_id: RecipeId::new(42).unwrap(),
            user_id: UserId::new(3).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(kind, Some(RatingKind::Dislike));
}

#[tokio::test]
async fn removed_rating_frees_the_pair_for_a_new_one() {
    let app = App::new();
    app.seed_recipe(42, 7).await;

    app.services.rate_recipe.handle(rate(3, 42, RatingKind::Like)).await.unwrap();
    app.services
        .remove_rating
        .handle(RemoveRatingCommand {
            principal: user(3),
            recipe_id: RecipeId::new(42).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(summary(&app, 42).await, RatingSummary::new(0, 0));

    let again = app
        .services
        .rate_recipe
        .handle(rate(3, 42, RatingKind::Dislike))
        .await
        .unwrap();

    assert_eq!(again.outcome, RateOutcome::Created);
    assert_eq!(summary(&app, 42).await, RatingSummary::new(0, 1));
    assert_eq!(app.rows_for(RecipeId::new(42).unwrap(), UserId::new(3).unwrap()), 2);
}

#[tokio::test]
async fn most_rated_orders_by_score_then_id() {
    let app = App::new();
    for id in [1, 2, 3] {
        app.seed_recipe(id, 7).await;
    }
    for voter in [10, 11] {
        app.services.rate_recipe.handle(rate(voter, 3, RatingKind::Like)).await.unwrap();
    }
    app.services.rate_recipe.handle(rate(10, 1, RatingKind::Like)).await.unwrap();
    app.services.rate_recipe.handle(rate(10, 2, RatingKind::Like)).await.unwrap();

    let ranked = app
        .services
        .most_rated
        .handle(MostRatedQuery { limit: 2 })
        .await
        .unwrap();

    let ids: Vec<i64> = ranked.iter().map(|r| r.recipe_id.value()).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[tokio::test]
async fn login_token_round_trips_until_expiry() {
    let app = App::new();
    app.services
        .register_account
        .handle(RegisterAccountCommand {
            name: "Cook".to_string(),
            email: "cook@example.com".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();

    let login = app
        .services
        .authenticate
        .handle(AuthenticateCommand {
            email: "cook@example.com".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();

    let principal = app.services.tokens.validate(&login.token.token).await.unwrap();
    assert_eq!(principal.id, login.principal.id);
    assert!(principal.has_role(Role::User));

    app.clock.advance(Duration::minutes(31));
    assert_eq!(
        app.services.tokens.validate(&login.token.token).await,
        Err(AuthError::TokenExpired)
    );
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let app = App::new();
    app.services
        .register_account
        .handle(RegisterAccountCommand {
            name: "Cook".to_string(),
            email: "cook@example.com".to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();

    let err = app
        .services
        .authenticate
        .handle(AuthenticateCommand {
            email: "cook@example.com".to_string(),
            password: "battery staple".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidCredentials);
}

#[tokio::test]
async fn bearer_token_resolves_to_principal_for_handlers() {
    let app = App::new();
    let recipe = app.seed_recipe(8, 7).await;
    let sessions: Arc<dyn SessionValidator> = Arc::new(
        MockSessionValidator::new()
            .with_test_user("author-token", 7)
            .with_test_user("other-token", 9),
    );

    let author = sessions.validate("author-token").await.unwrap();
    let updated = app
        .services
        .update_recipe
        .handle(UpdateRecipeCommand {
            principal: author,
            recipe_id: recipe.id(),
            changes: RecipeChanges {
                servings: Some(4),
                ..RecipeChanges::default()
            },
        })
        .await
        .unwrap()
        .recipe;
    assert_eq!(updated.servings(), Some(4));

    let other = sessions.validate("other-token").await.unwrap();
    let err = app
        .services
        .delete_recipe
        .handle(DeleteRecipeCommand {
            principal: other,
            recipe_id: recipe.id(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Forbidden);

    assert_eq!(
        sessions.validate("unknown").await,
        Err(AuthError::InvalidToken)
    );
}
