//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, principal, policy, errors)
//! - `recipe` - Recipe aggregate with author-or-admin mutation rules
//! - `rating` - Like/dislike aggregate, counts and popularity ranking
//! - `comment` - Comments on recipes
//! - `account` - User accounts and credentials
//! - `catalog` - Admin-managed ingredients and utensils

pub mod account;
pub mod catalog;
pub mod comment;
pub mod foundation;
pub mod rating;
pub mod recipe;
