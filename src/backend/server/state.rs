/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits that let handlers extract only the part of the state
 * they need.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // query with the pool
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenService;
use crate::backend::notifications::NotificationDispatcher;
use crate::shared::AppConfig;

/// Application state shared by every request handler
///
/// Cheap to clone: every field is a handle (`Arc`, pool or channel sender).
#[derive(Clone)]
pub struct AppState {
    /// Validated configuration
    pub config: Arc<AppConfig>,

    /// SQLite connection pool
    pub db_pool: SqlitePool,

    /// JWT issuer and verifier
    pub tokens: Arc<TokenService>,

    /// Queue for outbound account emails
    pub notifications: NotificationDispatcher,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for NotificationDispatcher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.notifications.clone()
    }
}
