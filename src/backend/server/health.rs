//! Liveness endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::backend::error::BackendError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// `GET /health`: 200 when the database answers, 500 otherwise
pub async fn health(State(pool): State<SqlitePool>) -> Result<Json<HealthResponse>, BackendError> {
    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(Json(HealthResponse {
        status: "ok",
        service: "auth_service",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
