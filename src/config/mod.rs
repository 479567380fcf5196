//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `RECIPE_SHARE` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use recipe_share::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::{Argon2Config, AuthConfig, MIN_PRODUCTION_SECRET_BYTES};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Environment and log filter
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection pool
    pub database: DatabaseConfig,

    /// Token signing and password hashing
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RECIPE_SHARE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `RECIPE_SHARE__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    /// - `RECIPE_SHARE__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RECIPE_SHARE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "RECIPE_SHARE__DATABASE__URL",
        "RECIPE_SHARE__AUTH__JWT_SECRET",
        "RECIPE_SHARE__AUTH__TOKEN_EXPIRATION_MINUTES",
        "RECIPE_SHARE__AUTH__ARGON2__ITERATIONS",
        "RECIPE_SHARE__SERVER__ENVIRONMENT",
    ];

    fn set_minimal_env() {
        env::set_var("RECIPE_SHARE__DATABASE__URL", "postgresql://test@localhost/recipes");
        env::set_var("RECIPE_SHARE__AUTH__JWT_SECRET", "dev-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.database.url, "postgresql://test@localhost/recipes");
        assert_eq!(config.auth.jwt_secret.expose_secret(), "dev-secret");
        assert_eq!(config.auth.issuer, "recipe-share");
        assert_eq!(config.auth.token_expiration_minutes, 30);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_argon2_override() {
        let config = load_with(&[("RECIPE_SHARE__AUTH__ARGON2__ITERATIONS", "4")]).unwrap();
        assert_eq!(config.auth.argon2.iterations, 4);
        assert_eq!(config.auth.argon2.parallelism, 1);
    }

    #[test]
    fn test_non_positive_window_fails_validation() {
        let config =
            load_with(&[("RECIPE_SHARE__AUTH__TOKEN_EXPIRATION_MINUTES", "0")]).unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidTokenWindow));
    }

    #[test]
    fn test_production_requires_strong_secret() {
        let config = load_with(&[("RECIPE_SHARE__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::WeakJwtSecret(32)));
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        env::set_var("RECIPE_SHARE__DATABASE__URL", "postgresql://test@localhost/recipes");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
