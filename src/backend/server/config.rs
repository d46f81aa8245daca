/**
 * Database Setup
 *
 * Opens the SQLite pool described by `DatabaseConfig` and brings the schema
 * up to date with the embedded migrations. Unlike optional services, the
 * database is mandatory: any failure here aborts startup.
 *
 * An in-memory URL (`sqlite::memory:`) is pinned to a single connection that
 * never expires, since every new connection would see an empty database.
 */

use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::backend::error::StartupError;
use crate::shared::config::DatabaseConfig;

/// Connect to the database and run migrations
///
/// # Errors
/// * `StartupError::Database` if the URL is invalid or the file cannot be opened
/// * `StartupError::Migration` if a migration fails
pub async fn load_database(config: &DatabaseConfig) -> Result<SqlitePool, StartupError> {
    let in_memory = config.url.contains(":memory:") || config.url.contains("mode=memory");

    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    tracing::info!(url = %config.url, "Connecting to database...");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };
    let pool = pool_options.connect_with(options).await?;

    tracing::info!("Database connection pool created successfully");

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
