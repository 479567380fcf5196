//! Rating aggregate: a user's like or dislike of a recipe.
//!
//! # Lifecycle
//!
//! ```text
//! NoRating ──rate──► Active(kind) ──soft_delete──► Deleted
//!                      │    ▲
//!                      └────┘ change_kind
//! ```
//!
//! `Deleted` is terminal. Rating the same recipe again creates a new row.

use crate::domain::foundation::{
    DomainError, ErrorCode, RatingId, RecipeId, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Like or dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingKind {
    Like,
    Dislike,
}

impl RatingKind {
    /// Returns the stored name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RatingKind::Like => "like",
            RatingKind::Dislike => "dislike",
        }
    }
}

impl fmt::Display for RatingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RatingKind {
    type Err = ValidationError;

    /// Accepts exactly `"like"` or `"dislike"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(RatingKind::Like),
            "dislike" => Ok(RatingKind::Dislike),
            other => Err(ValidationError::invalid_rating_kind(other)),
        }
    }
}

/// Observable state of a rating row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingState {
    Active(RatingKind),
    Deleted,
}

/// Rating aggregate.
///
/// # Invariants
///
/// - `deleted_at` is set at most once and never cleared
/// - `kind` changes only while active
/// - `created_at` never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    id: RatingId,
    recipe_id: RecipeId,
    user_id: UserId,
    kind: RatingKind,
    created_at: Timestamp,
    deleted_at: Option<Timestamp>,
}

impl Rating {
    /// Create a new active rating.
    ///
    /// Callers look up the active rating for the pair first and use
    /// `change_kind` when one exists.
    pub fn rate(
        id: RatingId,
        recipe_id: RecipeId,
        user_id: UserId,
        kind: RatingKind,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            recipe_id,
            user_id,
            kind,
            created_at: now,
            deleted_at: None,
        }
    }

    /// Reconstitute a rating from persistence.
    pub fn reconstitute(
        id: RatingId,
        recipe_id: RecipeId,
        user_id: UserId,
        kind: RatingKind,
        created_at: Timestamp,
        deleted_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            recipe_id,
            user_id,
            kind,
            created_at,
            deleted_at,
        }
    }

    pub fn id(&self) -> RatingId {
        self.id
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn kind(&self) -> RatingKind {
        self.kind
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn deleted_at(&self) -> Option<&Timestamp> {
        self.deleted_at.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn is_like(&self) -> bool {
        self.kind == RatingKind::Like
    }

    pub fn state(&self) -> RatingState {
        if self.is_active() {
            RatingState::Active(self.kind)
        } else {
            RatingState::Deleted
        }
    }

    /// Switch between like and dislike in place.
    ///
    /// Returns whether the kind actually changed.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the rating was soft-deleted
    pub fn change_kind(&mut self, new_kind: RatingKind) -> Result<bool, DomainError> {
        if !self.is_active() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Cannot change a deleted rating",
            )
            .with_detail("rating_id", self.id.to_string()));
        }
        let changed = self.kind != new_kind;
        self.kind = new_kind;
        Ok(changed)
    }

    /// Mark the rating deleted.
    ///
    /// Returns `false` without touching `deleted_at` when already deleted.
    pub fn soft_delete(&mut self, now: Timestamp) -> bool {
        if self.deleted_at.is_some() {
            return false;
        }
        self.deleted_at = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(secs: i64) -> Timestamp {
        Timestamp::from_unix_secs(secs).unwrap()
    }

    fn like() -> Rating {
        Rating::rate(
            RatingId::new(1).unwrap(),
            RecipeId::new(42).unwrap(),
            UserId::new(3).unwrap(),
            RatingKind::Like,
            t(100),
        )
    }

    #[test]
    fn kind_parses_exact_names() {
        assert_eq!("like".parse::<RatingKind>().unwrap(), RatingKind::Like);
        assert_eq!("dislike".parse::<RatingKind>().unwrap(), RatingKind::Dislike);
    }

    #[test]
    fn kind_rejects_anything_else() {
        for raw in ["", "LIKE", "love", " like"] {
            let err = raw.parse::<RatingKind>().unwrap_err();
            assert_eq!(DomainError::from(err).code, ErrorCode::InvalidRatingKind);
        }
    }

    #[test]
    fn rate_creates_active_rating() {
        let rating = like();
        assert!(rating.is_active());
        assert!(rating.is_like());
        assert_eq!(rating.state(), RatingState::Active(RatingKind::Like));
        assert_eq!(rating.created_at(), &t(100));
    }

    #[test]
    fn change_kind_toggles_in_place() {
        let mut rating = like();

        assert!(rating.change_kind(RatingKind::Dislike).unwrap());

        assert_eq!(rating.kind(), RatingKind::Dislike);
        assert_eq!(rating.id(), RatingId::new(1).unwrap());
        assert_eq!(rating.created_at(), &t(100));
    }

    #[test]
    fn change_kind_twice_to_same_kind_is_stable() {
        let mut rating = like();

        rating.change_kind(RatingKind::Dislike).unwrap();
        let changed_again = rating.change_kind(RatingKind::Dislike).unwrap();

        assert!(!changed_again);
        assert_eq!(rating.kind(), RatingKind::Dislike);
    }

    #[test]
    fn change_kind_on_deleted_rating_fails() {
        let mut rating = like();
        rating.soft_delete(t(200));

        let err = rating.change_kind(RatingKind::Dislike).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(rating.kind(), RatingKind::Like);
    }

    #[test]
    fn soft_delete_sets_deleted_at() {
        let mut rating = like();

        assert!(rating.soft_delete(t(200)));

        assert!(!rating.is_active());
        assert_eq!(rating.deleted_at(), Some(&t(200)));
        assert_eq!(rating.state(), RatingState::Deleted);
    }

    #[test]
    fn second_soft_delete_is_a_no_op() {
        let mut rating = like();
        rating.soft_delete(t(200));

        assert!(!rating.soft_delete(t(300)));
        assert_eq!(rating.deleted_at(), Some(&t(200)));
    }
}
