/**
 * Router Configuration
 *
 * This module combines all route configurations into the single router the
 * server runs.
 *
 * # Layout
 *
 * 1. `GET /health` at the root
 * 2. Account routes nested under `server.api_prefix`
 * 3. JSON 404 fallback
 *
 * Request bodies are capped at `uploads.max_request_bytes` and every request
 * is traced.
 */

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::health::health;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let prefix = app_state.config.server.api_prefix.trim_end_matches('/').to_string();
    let body_limit = app_state.config.uploads.max_request_bytes;

    let accounts = configure_api_routes(Router::new(), app_state.clone());

    Router::new()
        .route("/health", get(health))
        .nest(&prefix, accounts)
        .fallback(|| async { BackendError::not_found("Not found.") })
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
