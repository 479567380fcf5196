//! Recipe aggregate entity.
//!
//! A recipe belongs to the user who created it. The author is fixed at
//! creation and, apart from administrators, is the only principal allowed
//! to edit or delete the recipe.

use crate::domain::foundation::{
    Authorizable, DomainError, OwnedByUser, RecipeId, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Maximum length for a recipe name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Recipes at or under this preparation time count as quick.
pub const QUICK_RECIPE_MAX_MINUTES: i32 = 30;

/// Field values for a new recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub prep_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
}

/// Partial update for an existing recipe.
///
/// `None`, blank text, and non-positive numbers all leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub prep_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
}

/// Recipe aggregate.
///
/// # Invariants
///
/// - `name` is non-blank and at most `MAX_NAME_LENGTH` characters
/// - `prep_time_minutes` and `servings` are positive when present
/// - `author_id` never changes after creation
/// - `updated_at` advances on every successful mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    name: String,
    prep_time_minutes: Option<i32>,
    servings: Option<i32>,
    difficulty: Option<String>,
    body: Option<String>,
    category: Option<String>,
    author_id: UserId,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Recipe {
    /// Create a new recipe authored by `author_id`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank or too long
    /// - `ValidationFailed` if a numeric field is present and not positive
    pub fn create(
        id: RecipeId,
        author_id: UserId,
        fields: NewRecipe,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let name = validate_name(&fields.name)?;
        let prep_time_minutes = validate_positive("prep_time_minutes", fields.prep_time_minutes)?;
        let servings = validate_positive("servings", fields.servings)?;

        Ok(Self {
            id,
            name,
            prep_time_minutes,
            servings,
            difficulty: fields.difficulty,
            body: fields.body,
            category: fields.category,
            author_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a recipe from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RecipeId,
        name: String,
        prep_time_minutes: Option<i32>,
        servings: Option<i32>,
        difficulty: Option<String>,
        body: Option<String>,
        category: Option<String>,
        author_id: UserId,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            prep_time_minutes,
            servings,
            difficulty,
            body,
            category,
            author_id,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> RecipeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prep_time_minutes(&self) -> Option<i32> {
        self.prep_time_minutes
    }

    pub fn servings(&self) -> Option<i32> {
        self.servings
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// True when a preparation time is known and at most 30 minutes.
    pub fn is_quick(&self) -> bool {
        matches!(self.prep_time_minutes, Some(minutes) if minutes <= QUICK_RECIPE_MAX_MINUTES)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a partial update.
    ///
    /// Callers authorize the principal first. Invalid values are skipped and
    /// the name is stored trimmed.
    pub fn update_details(&mut self, changes: RecipeChanges, now: Timestamp) {
        if let Some(Ok(name)) = changes.name.as_deref().map(validate_name) {
            self.name = name;
        }
        if let Some(minutes) = changes.prep_time_minutes.filter(|m| *m > 0) {
            self.prep_time_minutes = Some(minutes);
        }
        if let Some(servings) = changes.servings.filter(|s| *s > 0) {
            self.servings = Some(servings);
        }
        if let Some(difficulty) = non_blank(changes.difficulty) {
            self.difficulty = Some(difficulty);
        }
        if let Some(body) = non_blank(changes.body) {
            self.body = Some(body);
        }
        if let Some(category) = non_blank(changes.category) {
            self.category = Some(category);
        }

        self.updated_at = now;
    }
}

impl OwnedByUser for Recipe {
    fn owner_id(&self) -> &UserId {
        &self.author_id
    }
}

impl Authorizable for Recipe {
    const RESOURCE_TYPE: &'static str = "Recipe";

    fn resource_id(&self) -> String {
        self.id.to_string()
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::too_long("name", MAX_NAME_LENGTH));
    }
    Ok(trimmed.to_string())
}

fn validate_positive(field: &str, value: Option<i32>) -> Result<Option<i32>, ValidationError> {
    match value {
        Some(v) if v <= 0 => Err(ValidationError::not_positive(field, i64::from(v))),
        other => Ok(other),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
