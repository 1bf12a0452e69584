//! # LearnHub DB
//!
//! PostgreSQL pool initialization and schema migrations.
//!
//! The pool is bounded by [`DatabaseConfig::max_connections`]; requests that
//! arrive while every connection is busy wait for one to be released.
//!
//! # Example
//!
//! ```ignore
//! use learnhub_config::DatabaseConfig;
//! use learnhub_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env();
//! let pool = init_db_pool(&config).await?;
//! run_migrations(&pool).await?;
//! ```

use learnhub_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Embedded migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Creates the shared connection pool.
///
/// Fails with [`sqlx::Error::Configuration`] when `DATABASE_URL` is unset.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
