//! Rating domain module.
//!
//! At most one active rating exists per (recipe, user) pair. The aggregate
//! handles toggling and soft deletion; the store's uniqueness constraint is
//! the backstop against concurrent duplicate inserts.

mod aggregate;
mod summary;

pub use aggregate::{Rating, RatingKind, RatingState};
pub use summary::{rank_by_popularity, RankedRecipe, RatingSummary};
