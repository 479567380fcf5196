//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::application::TokenWindow;

/// Shortest HS256 secret accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Token signing and password hashing settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: SecretString,

    /// `iss` claim written into and required on every token
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Lifetime of an issued token
    #[serde(default = "default_token_expiration_minutes")]
    pub token_expiration_minutes: i64,

    #[serde(default)]
    pub argon2: Argon2Config,
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct Argon2Config {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    #[serde(default = "default_iterations")]
    pub iterations: u32,

    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl AuthConfig {
    /// The configured token window.
    ///
    /// # Errors
    ///
    /// - `InvalidTokenWindow` if `token_expiration_minutes` is not positive or too large
    pub fn token_window(&self) -> Result<TokenWindow, ValidationError> {
        TokenWindow::from_minutes(self.token_expiration_minutes)
            .map_err(|_| ValidationError::InvalidTokenWindow)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::WeakJwtSecret(MIN_PRODUCTION_SECRET_BYTES));
        }
        if self.issuer.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        self.token_window()?;
        self.argon2.validate()
    }
}

impl Argon2Config {
    pub fn validate(&self) -> Result<(), ValidationError> {
        argon2::Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidArgon2Params(e.to_string()))
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_issuer() -> String {
    "recipe-share".to_string()
}

fn default_token_expiration_minutes() -> i64 {
    30
}

// OWASP baseline for Argon2id: 19 MiB, 2 passes, 1 lane.
fn default_memory_kib() -> u32 {
    19_456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
