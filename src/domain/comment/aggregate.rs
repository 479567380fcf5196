//! Comment aggregate entity.

use crate::domain::foundation::{
    Authorizable, CommentId, DomainError, ErrorCode, OwnedByUser, RecipeId, StateMachine,
    Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Maximum length for a comment body.
pub const MAX_BODY_LENGTH: usize = 2_000;

/// Lifecycle of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Active,
    Inactive,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Active => "active",
            CommentStatus::Inactive => "inactive",
        }
    }

    /// Parses the stored name, returning `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(CommentStatus::Active),
            "inactive" => Some(CommentStatus::Inactive),
            _ => None,
        }
    }
}

impl StateMachine for CommentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (CommentStatus::Active, CommentStatus::Inactive))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            CommentStatus::Active => vec![CommentStatus::Inactive],
            CommentStatus::Inactive => vec![],
        }
    }
}

/// Comment on a recipe.
///
/// # Invariants
///
/// - `author_id` and `recipe_id` never change
/// - `body` is non-blank
/// - inactive comments cannot be edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    recipe_id: RecipeId,
    author_id: UserId,
    body: String,
    status: CommentStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Comment {
    /// Create a new active comment.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the body is blank or too long
    pub fn post(
        id: CommentId,
        recipe_id: RecipeId,
        author_id: UserId,
        body: &str,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let body = validate_body(body)?;
        Ok(Self {
            id,
            recipe_id,
            author_id,
            body,
            status: CommentStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a comment from persistence.
    pub fn reconstitute(
        id: CommentId,
        recipe_id: RecipeId,
        author_id: UserId,
        body: String,
        status: CommentStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            recipe_id,
            author_id,
            body,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe_id
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn status(&self) -> CommentStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_active(&self) -> bool {
        self.status == CommentStatus::Active
    }

    pub fn is_author(&self, user_id: &UserId) -> bool {
        self.is_owner(user_id)
    }

    /// Replace the body. Callers authorize the principal first.
    ///
    /// A blank body leaves the comment untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the comment is inactive
    /// - `ValidationFailed` if the body is too long
    pub fn edit(&mut self, body: &str, now: Timestamp) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Cannot edit an inactive comment",
            )
            .with_detail("comment_id", self.id.to_string()));
        }
        if body.trim().is_empty() {
            return Ok(());
        }
        self.body = validate_body(body)?;
        self.updated_at = now;
        Ok(())
    }

    /// Deactivate the comment. Callers authorize the principal first.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already inactive
    pub fn deactivate(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.status = self.status.transition_to(CommentStatus::Inactive)?;
        self.updated_at = now;
        Ok(())
    }
}

impl OwnedByUser for Comment {
    fn owner_id(&self) -> &UserId {
        &self.author_id
    }
}

impl Authorizable for Comment {
    const RESOURCE_TYPE: &'static str = "Comment";

    fn resource_id(&self) -> String {
        self.id.to_string()
    }
}

fn validate_body(body: &str) -> Result<String, ValidationError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("body"));
    }
    if trimmed.chars().count() > MAX_BODY_LENGTH {
        return Err(ValidationError::too_long("body", MAX_BODY_LENGTH));
    }
    Ok(trimmed.to_string())
}
