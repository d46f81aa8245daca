/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /login.
 *
 * # Authentication Process
 *
 * 1. Require both email and password
 * 2. Verify the credentials with bcrypt
 * 3. Issue an access/refresh token pair
 * 4. Record the login time
 *
 * # Security
 *
 * - An unknown email and a wrong password produce the identical 401
 * - Inactive accounts cannot log in
 * - Passwords and tokens are never logged
 */

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::backend::auth::credentials::authenticate;
use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::users::touch_last_login;
use crate::backend::auth::validation::normalize_email;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub const CREDENTIALS_REQUIRED: &str = "Email and password are required.";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
pub const LOGIN_SUCCESSFUL: &str = "Login successful.";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - Missing field, unknown email, wrong password or
///   inactive account
/// * `500 Internal Server Error` - Database, hashing or signing failure
///
/// # Example Request
///
/// ```http
/// POST /api/v1/users/login HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "a@x.com", "password": "secret123" }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "access": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "refresh": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "message": "Login successful."
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, BackendError> {
    let Json(request) = payload?;

    let (Some(email), Some(password)) = (
        request.email.filter(|e| !e.trim().is_empty()),
        request.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(BackendError::authentication(CREDENTIALS_REQUIRED));
    };

    let email = normalize_email(&email);
    let user = authenticate(&state.db_pool, &email, &password, state.config.auth.bcrypt_cost)
        .await?
        .ok_or_else(|| BackendError::authentication(INVALID_CREDENTIALS))?;

    let pair = state.tokens.issue_pair(user.id).map_err(|e| {
        tracing::error!(user_id = user.id, error = %e, "Failed to sign tokens");
        BackendError::internal(e)
    })?;

    touch_last_login(&state.db_pool, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        access: pair.access,
        refresh: pair.refresh,
        message: LOGIN_SUCCESSFUL.to_string(),
    }))
}
