//! Recipe Share service entry point.
//!
//! Loads configuration, initialises tracing, connects to PostgreSQL, applies
//! migrations, and wires the application services.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use recipe_share::adapters::auth::{Argon2Hasher, HmacJwtCodec};
use recipe_share::adapters::clock::SystemClock;
use recipe_share::adapters::postgres::{
    self, PostgresAccountRepository, PostgresCatalogRepository, PostgresCommentRepository,
    PostgresRatingRepository, PostgresRecipeRepository,
};
use recipe_share::application::{Services, Stores, TokenService};
use recipe_share::config::{AppConfig, ServerConfig};
use recipe_share::domain::foundation::{IngredientId, UtensilId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let pool = postgres::connect(&config.database).await?;
    if config.database.run_migrations {
        postgres::migrate(&pool).await?;
        info!("Migrations applied");
    }

    let clock = Arc::new(SystemClock);
    let argon2 = config.auth.argon2;
    let hasher = Arc::new(Argon2Hasher::new(
        argon2.memory_kib,
        argon2.iterations,
        argon2.parallelism,
    )?);
    let codec = Arc::new(HmacJwtCodec::new(&config.auth.jwt_secret, &config.auth.issuer));
    let tokens = Arc::new(TokenService::new(
        codec,
        clock.clone(),
        config.auth.issuer.clone(),
        config.auth.token_window()?,
    ));

    let stores = Stores {
        accounts: Arc::new(PostgresAccountRepository::new(pool.clone())),
        recipes: Arc::new(PostgresRecipeRepository::new(pool.clone())),
        ratings: Arc::new(PostgresRatingRepository::new(pool.clone())),
        comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
        ingredients: Arc::new(PostgresCatalogRepository::<IngredientId>::new(pool.clone())),
        utensils: Arc::new(PostgresCatalogRepository::<UtensilId>::new(pool)),
    };
    let services = Services::new(stores, hasher, tokens, clock);

    info!(
        environment = ?config.server.environment,
        issuer = %services.tokens.issuer(),
        token_window_secs = services.tokens.window().as_secs(),
        "Recipe Share services ready"
    );

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    Ok(())
}

/// JSON lines in production, compact text elsewhere. `RUST_LOG` wins over
/// the configured filter when set.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if server.is_production() {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).compact().try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing init failed: {e}");
    }
}
