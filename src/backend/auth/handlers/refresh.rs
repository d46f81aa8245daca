/**
 * Token Refresh Handler
 *
 * POST /token/refresh exchanges a valid refresh token for a new access
 * token. Revoked refresh tokens and tokens of deleted or inactive users are
 * rejected; the refresh token itself is not rotated.
 */

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::backend::auth::blacklist::is_revoked;
use crate::backend::auth::handlers::types::{RefreshRequest, RefreshResponse};
use crate::backend::auth::sessions::TokenType;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::error::REQUIRED;

pub const TOKEN_INVALID_OR_EXPIRED: &str = "Token is invalid or expired.";

/// Refresh handler
///
/// # Errors
///
/// * `400 Bad Request` - `{"refresh": ["This field is required."]}`
/// * `401 Unauthorized` - Invalid, expired, revoked or orphaned token
///
/// # Example Response
///
/// ```json
/// { "access": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
/// ```
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<RefreshResponse>, BackendError> {
    let Json(request) = payload?;
    let token = request
        .refresh
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| BackendError::field("refresh", REQUIRED))?;

    let claims = state
        .tokens
        .verify(token.trim(), TokenType::Refresh)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected refresh token");
            BackendError::authorization(TOKEN_INVALID_OR_EXPIRED)
        })?;
    let user_id = claims
        .user_id()
        .map_err(|_| BackendError::authorization(TOKEN_INVALID_OR_EXPIRED))?;

    if is_revoked(&state.db_pool, &claims.jti).await? {
        tracing::debug!(user_id, "Refresh with revoked token");
        return Err(BackendError::authorization(TOKEN_INVALID_OR_EXPIRED));
    }

    let active = get_user_by_id(&state.db_pool, user_id)
        .await?
        .is_some_and(|user| user.is_active);
    if !active {
        return Err(BackendError::authorization(TOKEN_INVALID_OR_EXPIRED));
    }

    let access = state.tokens.issue_access(user_id).map_err(BackendError::internal)?;
    Ok(Json(RefreshResponse { access }))
}
