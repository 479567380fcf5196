//! Connection pool setup and schema migration.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a pool sized and timed from configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database(format!("Failed to connect to database: {}", e)))
}

/// Applies the embedded migrations under `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}
