//! Rating handlers.

mod rate_recipe;
mod rating_queries;
mod remove_rating;

pub use rate_recipe::{RateOutcome, RateRecipeCommand, RateRecipeHandler, RateRecipeResult};
pub use rating_queries::{
    GetRatingSummaryHandler, GetRatingSummaryQuery, GetUserRatingHandler, GetUserRatingQuery,
    MostRatedHandler, MostRatedQuery, DEFAULT_MOST_RATED_LIMIT,
};
pub use remove_rating::{RemoveRatingCommand, RemoveRatingHandler, RemoveRatingResult};
