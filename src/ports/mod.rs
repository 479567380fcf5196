//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Identity Ports
//!
//! - `TokenCodec` - Signs and verifies token claims
//! - `SessionValidator` - Turns a bearer token into a `Principal`
//! - `PasswordHasher` - Salted password hashing
//!
//! ## Persistence Ports
//!
//! - `RecipeRepository`, `RatingRepository`, `CommentRepository`,
//!   `AccountRepository`, `CatalogRepository`
//!
//! ## Time
//!
//! - `Clock` - Injected source of the current time

mod account_repository;
mod catalog_repository;
mod clock;
mod comment_repository;
mod password_hasher;
mod rating_repository;
mod recipe_repository;
mod session_validator;
mod token_codec;

pub use account_repository::AccountRepository;
pub use catalog_repository::CatalogRepository;
pub use clock::Clock;
pub use comment_repository::CommentRepository;
pub use password_hasher::PasswordHasher;
pub use rating_repository::RatingRepository;
pub use recipe_repository::RecipeRepository;
pub use session_validator::SessionValidator;
pub use token_codec::{TokenClaims, TokenCodec};
