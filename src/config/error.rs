//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Connect timeout must be greater than zero")]
    InvalidConnectTimeout,

    #[error("Token window must be a positive number of minutes")]
    InvalidTokenWindow,

    #[error("JWT secret must be at least {0} bytes in production")]
    WeakJwtSecret(usize),

    #[error("Invalid Argon2 cost parameters: {0}")]
    InvalidArgon2Params(String),
}
