//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Every
//! handler receives an already-verified `Principal`; ownership and admin
//! checks go through `application::authorization::enforce`.

pub mod auth;
pub mod catalog;
pub mod comment;
pub mod rating;
pub mod recipe;

pub use auth::{
    AuthenticateCommand, AuthenticateHandler, AuthenticateResult, RefreshTokenCommand,
    RefreshTokenHandler, RefreshTokenResult, RegisterAccountCommand, RegisterAccountHandler,
    RegisterAccountResult,
};
pub use catalog::{
    CatalogHandler, CreateCatalogItemCommand, DeleteCatalogItemCommand, UpdateCatalogItemCommand,
};
pub use comment::{
    AddCommentCommand, AddCommentHandler, AddCommentResult, CommentResult,
    DeactivateCommentCommand, DeactivateCommentHandler, EditCommentCommand, EditCommentHandler,
    ListActiveCommentsHandler, ListActiveCommentsQuery,
};
pub use rating::{
    GetRatingSummaryHandler, GetRatingSummaryQuery, GetUserRatingHandler, GetUserRatingQuery,
    MostRatedHandler, MostRatedQuery, RateOutcome, RateRecipeCommand, RateRecipeHandler,
    RateRecipeResult, RemoveRatingCommand, RemoveRatingHandler, RemoveRatingResult,
    DEFAULT_MOST_RATED_LIMIT,
};
pub use recipe::{
    CreateRecipeCommand, CreateRecipeHandler, CreateRecipeResult, DeleteRecipeCommand,
    DeleteRecipeHandler, UpdateRecipeCommand, UpdateRecipeHandler, UpdateRecipeResult,
};
