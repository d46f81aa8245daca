/**
 * Logout Handler
 *
 * POST /logout revokes the caller's refresh token by blacklisting its id.
 * The access token used to authenticate the request stays valid until it
 * expires; it is short-lived.
 *
 * Every revocation failure is answered with the same generic 400 so that
 * the response says nothing about why a token was refused.
 */

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use thiserror::Error;

use crate::backend::auth::blacklist::{revoke, RevokeOutcome};
use crate::backend::auth::handlers::types::{DetailResponse, RefreshRequest};
use crate::backend::auth::sessions::{TokenError, TokenType};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

pub const REFRESH_REQUIRED: &str = "Refresh token is required for logout.";
pub const LOGOUT_FAILED: &str = "Unable to log out.";
pub const LOGOUT_SUCCESSFUL: &str = "Logout successful.";

#[derive(Debug, Error)]
enum LogoutError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("token belongs to user {owner}")]
    ForeignToken { owner: i64 },

    #[error("token already revoked")]
    AlreadyRevoked,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

async fn revoke_for(state: &AppState, caller: i64, token: &str) -> Result<(), LogoutError> {
    let claims = state.tokens.verify(token, TokenType::Refresh)?;
    let owner = claims.user_id()?;
    if owner != caller {
        return Err(LogoutError::ForeignToken { owner });
    }

    match revoke(&state.db_pool, &claims, caller).await? {
        RevokeOutcome::Revoked => Ok(()),
        RevokeOutcome::AlreadyRevoked => Err(LogoutError::AlreadyRevoked),
    }
}

/// Logout handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing token, or a token that cannot be revoked
/// * `401 Unauthorized` - Missing or invalid access token (middleware)
///
/// # Example Request
///
/// ```http
/// POST /api/v1/users/logout HTTP/1.1
/// Authorization: Bearer <access>
/// Content-Type: application/json
///
/// { "refresh": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
/// ```
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<DetailResponse>, BackendError> {
    let Json(request) = payload?;
    let token = request
        .refresh
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| BackendError::invalid_request(REFRESH_REQUIRED))?;

    match revoke_for(&state, user.user_id, token.trim()).await {
        Ok(()) => {
            tracing::info!(user_id = user.user_id, "User logged out");
            Ok(Json(DetailResponse {
                detail: LOGOUT_SUCCESSFUL.to_string(),
            }))
        }
        Err(LogoutError::Database(e)) => Err(BackendError::Database(e)),
        Err(e) => {
            tracing::warn!(user_id = user.user_id, error = %e, "Logout failed");
            Err(BackendError::invalid_request(LOGOUT_FAILED))
        }
    }
}
