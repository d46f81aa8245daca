//! Database test fixtures and utilities
//!
//! Every fixture opens its own in-memory SQLite database with migrations
//! applied, so tests never share rows.

use sqlx::SqlitePool;
use swapp_auth::backend::server::config::load_database;
use swapp_auth::shared::{AppConfig, AppConfigBuilder};

/// Builder preloaded with the integration test settings
///
/// Low bcrypt cost and near-zero retry delays keep the suite fast.
pub fn test_config_builder() -> AppConfigBuilder {
    AppConfig::builder()
        .database_url("sqlite::memory:")
        .jwt_secret("integration-secret")
        .bcrypt_cost(4)
        .notification_retry(2, 1)
}

/// Configuration used by every integration test
pub fn test_config() -> AppConfig {
    test_config_builder().build().expect("test config is valid")
}

/// Create a fresh in-memory pool with the schema applied
pub async fn create_test_pool() -> SqlitePool {
    load_database(&test_config().database)
        .await
        .expect("Failed to create test database pool")
}

/// Count rows of a table
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

/// Stored password hash of a user
pub async fn password_hash_of(pool: &SqlitePool, email: &str) -> String {
    sqlx::query_scalar("SELECT password_hash FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("user exists")
}
