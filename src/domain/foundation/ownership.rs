//! Ownership trait for user-owned resources.
//!
//! Recipes and comments record their author at creation. The author never
//! changes, and it is the only non-admin party allowed to mutate the resource.
//!
//! # Example
//!
//! ```ignore
//! impl OwnedByUser for Recipe {
//!     fn owner_id(&self) -> &UserId {
//!         &self.author_id
//!     }
//! }
//!
//! recipe.is_owner(&principal.id);
//! ```

use super::UserId;

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }
}
