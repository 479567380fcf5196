//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the principal, the authorization
//! policy, and error types that form the vocabulary of the recipe domain.

mod auth;
mod authorization;
mod errors;
mod ids;
mod ownership;
mod repository;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, Principal, Role};
pub use authorization::{
    can_mutate, check_mutation, require_admin, Authorizable, AuthorizationResult,
};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CommentId, IngredientId, RatingId, RecipeId, RecipeUuid, UserId, UtensilId};
pub use ownership::OwnedByUser;
pub use repository::Repository;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
