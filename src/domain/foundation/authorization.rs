//! Authorization policy and result types.
//!
//! A single predicate decides whether a principal may mutate an owned
//! resource: admins always may, everyone else only when they are the owner.
//! The same predicate gates recipe edit/delete and comment edit/deactivate.
//!
//! ```text
//! foundation/authorization.rs  <- Policy, result type, traits (this module)
//! application/authorization.rs <- Logging + conversion into DomainError
//! ```

use super::{DomainError, ErrorCode, OwnedByUser, Principal, UserId};

/// Returns true iff the principal is an admin or owns the resource.
pub fn can_mutate(principal: &Principal, owner_id: &UserId) -> bool {
    principal.is_admin() || principal.id == *owner_id
}

/// Result of an authorization check.
///
/// Contains both the decision and context for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResult {
    /// Whether access was granted.
    pub granted: bool,

    /// The resource type being accessed (e.g., "Recipe", "Comment").
    pub resource_type: &'static str,

    /// The ID of the resource being accessed.
    pub resource_id: String,

    /// The principal who requested access.
    pub user_id: String,

    /// Reason for denial, if denied.
    pub denial_reason: Option<String>,
}

impl AuthorizationResult {
    /// Creates a successful authorization result.
    pub fn granted(
        resource_type: &'static str,
        resource_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            granted: true,
            resource_type,
            resource_id: resource_id.into(),
            user_id: user_id.into(),
            denial_reason: None,
        }
    }

    /// Creates a denied authorization result.
    pub fn denied(
        resource_type: &'static str,
        resource_id: impl Into<String>,
        user_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            granted: false,
            resource_type,
            resource_id: resource_id.into(),
            user_id: user_id.into(),
            denial_reason: Some(reason.into()),
        }
    }

    /// Converts this result to a `Result<(), DomainError>`.
    ///
    /// Returns `Ok(())` if granted, `Err(Forbidden)` if denied.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.granted {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                self.denial_reason
                    .unwrap_or_else(|| "Access denied".to_string()),
            )
            .with_detail("resource_type", self.resource_type)
            .with_detail("resource_id", self.resource_id)
            .with_detail("user_id", self.user_id))
        }
    }

    /// Returns true if access was granted.
    pub fn is_granted(&self) -> bool {
        self.granted
    }

    /// Returns true if access was denied.
    pub fn is_denied(&self) -> bool {
        !self.granted
    }
}

/// Resources that can be named in authorization logs.
pub trait Authorizable {
    /// The type name for authorization logs (e.g., "Recipe", "Comment").
    const RESOURCE_TYPE: &'static str;

    /// Returns a string representation of this resource's ID.
    fn resource_id(&self) -> String;
}

/// Evaluates the mutation policy for an owned resource.
pub fn check_mutation<T>(resource: &T, principal: &Principal) -> AuthorizationResult
where
    T: OwnedByUser + Authorizable,
{
    if can_mutate(principal, resource.owner_id()) {
        AuthorizationResult::granted(
            T::RESOURCE_TYPE,
            resource.resource_id(),
            principal.id.to_string(),
        )
    } else {
        AuthorizationResult::denied(
            T::RESOURCE_TYPE,
            resource.resource_id(),
            principal.id.to_string(),
            format!(
                "User {} may not modify {} {}",
                principal.id,
                T::RESOURCE_TYPE,
                resource.resource_id()
            ),
        )
    }
}

/// Admin-only gate for resources without an owner (catalog entries).
pub fn require_admin(
    principal: &Principal,
    resource_type: &'static str,
    resource_id: impl Into<String>,
) -> AuthorizationResult {
    let resource_id = resource_id.into();
    if principal.is_admin() {
        AuthorizationResult::granted(resource_type, resource_id, principal.id.to_string())
    } else {
        AuthorizationResult::denied(
            resource_type,
            resource_id,
            principal.id.to_string(),
            format!("Only administrators may manage {} entries", resource_type),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Role;
    use proptest::prelude::*;

    struct TestResource {
        id: i64,
        owner: UserId,
    }

    impl OwnedByUser for TestResource {
        fn owner_id(&self) -> &UserId {
            &self.owner
        }
    }

    impl Authorizable for TestResource {
        const RESOURCE_TYPE: &'static str = "TestResource";

        fn resource_id(&self) -> String {
            self.id.to_string()
        }
    }

    fn uid(n: i64) -> UserId {
        UserId::new(n).unwrap()
    }

    fn user(n: i64) -> Principal {
        Principal::new(uid(n), [Role::User])
    }

    fn admin(n: i64) -> Principal {
        Principal::new(uid(n), [Role::User, Role::Admin])
    }

    // ============================================================
    // can_mutate Tests
    // ============================================================

    #[test]
    fn can_mutate_allows_owner() {
        assert!(can_mutate(&user(7), &uid(7)));
    }

    #[test]
    fn can_mutate_denies_other_user() {
        assert!(!can_mutate(&user(9), &uid(7)));
    }

    #[test]
    fn can_mutate_allows_admin_regardless_of_owner() {
        assert!(can_mutate(&admin(99), &uid(7)));
        assert!(can_mutate(&Principal::new(uid(99), [Role::Admin]), &uid(7)));
    }

    #[test]
    fn can_mutate_denies_principal_with_no_roles() {
        assert!(!can_mutate(&Principal::new(uid(9), Vec::<Role>::new()), &uid(7)));
    }

    proptest! {
        #[test]
        fn can_mutate_iff_admin_or_owner(
            principal in 1i64..50,
            owner in 1i64..50,
            is_admin in any::<bool>(),
        ) {
            let roles = if is_admin { vec![Role::User, Role::Admin] } else { vec![Role::User] };
            let p = Principal::new(uid(principal), roles);
            prop_assert_eq!(can_mutate(&p, &uid(owner)), is_admin || principal == owner);
        }
    }

    // ============================================================
    // AuthorizationResult Tests
    // ============================================================

    #[test]
    fn authorization_result_granted_creates_success() {
        let result = AuthorizationResult::granted("Recipe", "12", "7");

        assert!(result.is_granted());
        assert!(!result.is_denied());
        assert_eq!(result.resource_type, "Recipe");
        assert_eq!(result.resource_id, "12");
        assert_eq!(result.user_id, "7");
        assert!(result.denial_reason.is_none());
    }

    #[test]
    fn authorization_result_into_result_ok_for_granted() {
        let result = AuthorizationResult::granted("Recipe", "1", "1");
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn authorization_result_into_result_forbidden_for_denied() {
        let result = AuthorizationResult::denied("Recipe", "1", "9", "Denied");
        let err = result.into_result().unwrap_err();

        assert_eq!(err.code, ErrorCode::Forbidden);
        assert_eq!(err.details.get("resource_type"), Some(&"Recipe".to_string()));
        assert_eq!(err.details.get("resource_id"), Some(&"1".to_string()));
        assert_eq!(err.details.get("user_id"), Some(&"9".to_string()));
    }

    // ============================================================
    // check_mutation / require_admin Tests
    // ============================================================

    #[test]
    fn check_mutation_grants_for_owner() {
        let resource = TestResource { id: 1, owner: uid(7) };

        let result = check_mutation(&resource, &user(7));

        assert!(result.is_granted());
        assert_eq!(result.resource_type, "TestResource");
        assert_eq!(result.resource_id, "1");
    }

    #[test]
    fn check_mutation_denies_for_non_owner() {
        let resource = TestResource { id: 2, owner: uid(7) };

        let result = check_mutation(&resource, &user(9));

        assert!(result.is_denied());
        assert!(result.denial_reason.unwrap().contains("may not modify"));
    }

    #[test]
    fn check_mutation_grants_for_admin() {
        let resource = TestResource { id: 3, owner: uid(7) };
        assert!(check_mutation(&resource, &admin(99)).is_granted());
    }

    #[test]
    fn require_admin_denies_regular_user() {
        let result = require_admin(&user(3), "Ingredient", "new");
        assert!(result.is_denied());
        assert_eq!(result.into_result().unwrap_err().code, ErrorCode::Forbidden);
    }

    #[test]
    fn require_admin_grants_admin() {
        assert!(require_admin(&admin(1), "Utensil", "4").is_granted());
    }
}
