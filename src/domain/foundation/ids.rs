//! Strongly-typed identifier value objects.
//!
//! Stored entities use positive integer keys assigned by the persistence
//! store. The alternate recipe model keys its entries by an opaque UUID string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Creates the identifier, rejecting zero and negative values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::invalid_identifier($kind, value.to_string()));
                }
                Ok(Self(value))
            }

            /// Returns the raw integer value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::invalid_identifier($kind, s))?;
                Self::new(value)
            }
        }
    };
}

integer_id!(
    /// Identifier of a stored recipe.
    RecipeId,
    "recipe"
);

integer_id!(
    /// Identifier of a user account.
    UserId,
    "user"
);

integer_id!(
    /// Identifier of a comment on a recipe.
    CommentId,
    "comment"
);

integer_id!(
    /// Identifier of a like/dislike rating.
    RatingId,
    "rating"
);

integer_id!(
    /// Identifier of a catalog ingredient.
    IngredientId,
    "ingredient"
);

integer_id!(
    /// Identifier of a catalog utensil.
    UtensilId,
    "utensil"
);

/// Identifier for entries of the alternate recipe model, an opaque UUID string.
///
/// `generate()` does not check storage for collisions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecipeUuid(String);

impl RecipeUuid {
    /// Wraps an existing value, returning error if blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::invalid_identifier("recipe", value));
        }
        Ok(Self(value))
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecipeUuid {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecipeUuid> for String {
    fn from(id: RecipeUuid) -> String {
        id.0
    }
}

impl fmt::Display for RecipeUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecipeUuid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
