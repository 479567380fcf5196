//! Like/dislike counts and popularity ranking.

use serde::{Deserialize, Serialize};

use super::{Rating, RatingKind};
use crate::domain::foundation::RecipeId;

/// Active like/dislike counts for one recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub likes: u64,
    pub dislikes: u64,
}

impl RatingSummary {
    pub fn new(likes: u64, dislikes: u64) -> Self {
        Self { likes, dislikes }
    }

    /// Counts active ratings only, partitioned by kind.
    pub fn from_ratings<'a>(ratings: impl IntoIterator<Item = &'a Rating>) -> Self {
        ratings
            .into_iter()
            .filter(|r| r.is_active())
            .fold(Self::default(), |mut acc, r| {
                match r.kind() {
                    RatingKind::Like => acc.likes += 1,
                    RatingKind::Dislike => acc.dislikes += 1,
                }
                acc
            })
    }

    pub fn total(&self) -> u64 {
        self.likes + self.dislikes
    }

    /// `likes - dislikes`, used only for ordering.
    pub fn popularity_score(&self) -> i64 {
        self.likes as i64 - self.dislikes as i64
    }
}

/// A recipe together with its active counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRecipe {
    pub recipe_id: RecipeId,
    pub summary: RatingSummary,
}

/// Orders by popularity score descending, ties by recipe id ascending,
/// and keeps the first `limit` entries.
pub fn rank_by_popularity(mut entries: Vec<RankedRecipe>, limit: usize) -> Vec<RankedRecipe> {
    entries.sort_by(|a, b| {
        b.summary
            .popularity_score()
            .cmp(&a.summary.popularity_score())
            .then_with(|| a.recipe_id.cmp(&b.recipe_id))
    });
    entries.truncate(limit);
    entries
}
