//! Account aggregate entity.
//!
//! Accounts hold credentials and the admin flag that determines a
//! principal's role set. The password is only ever stored as a hash.

use crate::domain::foundation::{
    DomainError, Principal, Role, StateMachine, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for account name and email.
pub const MAX_FIELD_LENGTH: usize = 150;

/// Validated, lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email address.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if normalized.chars().count() > MAX_FIELD_LENGTH {
            return Err(ValidationError::too_long("email", MAX_FIELD_LENGTH));
        }
        match normalized.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
            {
                Ok(Self(normalized))
            }
            _ => Err(ValidationError::invalid_format(
                "email",
                "expected local@domain",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> String {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an account may sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AccountStatus::Active),
            "inactive" => Some(AccountStatus::Inactive),
            _ => None,
        }
    }
}

impl StateMachine for AccountStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self != target
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            AccountStatus::Active => vec![AccountStatus::Inactive],
            AccountStatus::Inactive => vec![AccountStatus::Active],
        }
    }
}

/// User account.
///
/// # Invariants
///
/// - `name` is non-blank, at most 150 characters
/// - `email` is a validated `Email`
/// - `password_hash` is a PHC-format hash, never plaintext
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: UserId,
    name: String,
    email: Email,
    password_hash: String,
    is_admin: bool,
    status: AccountStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Account {
    /// Create a new active, non-admin account.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank or too long
    pub fn register(
        id: UserId,
        name: &str,
        email: Email,
        password_hash: String,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let name = validate_name(name)?;
        Ok(Self {
            id,
            name,
            email,
            password_hash,
            is_admin: false,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an account from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        name: String,
        email: Email,
        password_hash: String,
        is_admin: bool,
        status: AccountStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            is_admin,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Principal for this account: `{admin}` when flagged, otherwise `{user}`.
    pub fn principal(&self) -> Principal {
        let role = if self.is_admin { Role::Admin } else { Role::User };
        Principal::new(self.id, [role])
            .with_email(self.email.as_str())
            .with_display_name(self.name.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Partial update; blank or absent values are ignored.
    pub fn update_details(&mut self, name: Option<&str>, email: Option<Email>, now: Timestamp) {
        if let Some(name) = name.and_then(|n| validate_name(n).ok()) {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        self.updated_at = now;
    }

    /// Replace the stored password hash.
    pub fn set_password_hash(&mut self, hash: String, now: Timestamp) {
        self.password_hash = hash;
        self.updated_at = now;
    }

    /// # Errors
    ///
    /// - `InvalidStateTransition` if already active
    pub fn activate(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.status = self.status.transition_to(AccountStatus::Active)?;
        self.updated_at = now;
        Ok(())
    }

    /// # Errors
    ///
    /// - `InvalidStateTransition` if already inactive
    pub fn deactivate(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.status = self.status.transition_to(AccountStatus::Inactive)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn make_admin(&mut self, now: Timestamp) {
        self.is_admin = true;
        self.updated_at = now;
    }

    pub fn revoke_admin(&mut self, now: Timestamp) {
        self.is_admin = false;
        self.updated_at = now;
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if trimmed.chars().count() > MAX_FIELD_LENGTH {
        return Err(ValidationError::too_long("name", MAX_FIELD_LENGTH));
    }
    Ok(trimmed.to_string())
}
