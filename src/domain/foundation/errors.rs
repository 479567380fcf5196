//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be positive, got {actual}")]
    NotPositive { field: String, actual: i64 },

    #[error("Field '{field}' must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Invalid {kind} identifier: '{raw}'")]
    InvalidIdentifier { kind: &'static str, raw: String },

    #[error("Rating kind must be 'like' or 'dislike', got '{raw}'")]
    InvalidRatingKind { raw: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a non-positive number validation error.
    pub fn not_positive(field: impl Into<String>, actual: i64) -> Self {
        ValidationError::NotPositive {
            field: field.into(),
            actual,
        }
    }

    /// Creates a too-long validation error.
    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid identifier error for the given entity kind.
    pub fn invalid_identifier(kind: &'static str, raw: impl Into<String>) -> Self {
        ValidationError::InvalidIdentifier {
            kind,
            raw: raw.into(),
        }
    }

    /// Creates an invalid rating kind error.
    pub fn invalid_rating_kind(raw: impl Into<String>) -> Self {
        ValidationError::InvalidRatingKind { raw: raw.into() }
    }

    /// Name of the offending field, when the error concerns one.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
            ValidationError::InvalidIdentifier { kind, .. } => kind,
            ValidationError::InvalidRatingKind { .. } => "kind",
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidIdentifier,
    InvalidRatingKind,

    // Identity errors
    TokenExpired,
    TokenInvalid,
    InvalidCredentials,
    AccountInactive,

    // Lookup and authorization errors
    NotFound,
    Forbidden,

    // State errors
    InvalidStateTransition,
    RatingConflict,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidIdentifier => "INVALID_IDENTIFIER",
            ErrorCode::InvalidRatingKind => "INVALID_RATING_KIND",
            ErrorCode::TokenExpired => "TOKEN_EXPIRED",
            ErrorCode::TokenInvalid => "TOKEN_INVALID",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::AccountInactive => "ACCOUNT_INACTIVE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::RatingConflict => "RATING_CONFLICT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates a not-found error for a resource.
    pub fn not_found(resource_type: &'static str, resource_id: impl fmt::Display) -> Self {
        let resource_id = resource_id.to_string();
        Self::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource_type, resource_id),
        )
        .with_detail("resource_type", resource_type)
        .with_detail("resource_id", resource_id)
    }

    /// Creates a database error from an adapter failure.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns true if this error has the given code.
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }

    /// Returns true if the caller may resolve this error by re-reading and retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self.code, ErrorCode::RatingConflict)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::InvalidIdentifier { .. } => ErrorCode::InvalidIdentifier,
            ValidationError::InvalidRatingKind { .. } => ErrorCode::InvalidRatingKind,
            _ => ErrorCode::ValidationFailed,
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}
