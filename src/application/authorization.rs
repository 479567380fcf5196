//! Application-side authorization helper.
//!
//! Handlers pass every policy decision through `enforce` so that denials
//! are logged the same way everywhere before turning into `Forbidden`.

use crate::domain::foundation::{AuthorizationResult, DomainError};

/// Logs the decision and converts it into a `Result`.
pub fn enforce(action: &'static str, result: AuthorizationResult) -> Result<(), DomainError> {
    if result.is_denied() {
        tracing::warn!(
            action,
            resource_type = result.resource_type,
            resource_id = %result.resource_id,
            user_id = %result.user_id,
            "Authorization denied"
        );
    } else {
        tracing::debug!(
            action,
            resource_type = result.resource_type,
            resource_id = %result.resource_id,
            user_id = %result.user_id,
            "Authorization granted"
        );
    }
    result.into_result()
}
