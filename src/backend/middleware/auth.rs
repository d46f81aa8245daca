/**
 * Authentication Middleware
 *
 * This module protects the routes that require a signed-in user. It reads
 * the bearer token from the `Authorization` header, verifies it as an access
 * token, checks that the account still exists and is active, and attaches
 * the caller's identity to the request for handlers to extract.
 *
 * Every failure answers 401 with a `{detail}` body before the handler runs.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::TokenType;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub const CREDENTIALS_MISSING: &str = "Authentication credentials were not provided.";
pub const TOKEN_INVALID: &str = "Given token not valid for any token type.";

/// Authenticated user data extracted from the access token
///
/// `email` and `first_name` are read from the database at request time so
/// that handlers can address notifications without another query.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
}

/// Extract the token from a `Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            BackendError::authorization(CREDENTIALS_MISSING)
        })?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::debug!("Invalid Authorization header format");
            BackendError::authorization(TOKEN_INVALID)
        })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies it as an access token
/// 3. Loads the user and requires the account to be active
/// 4. Attaches `AuthenticatedUser` to the request extensions
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?;

    let claims = app_state
        .tokens
        .verify(token, TokenType::Access)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            BackendError::authorization(TOKEN_INVALID)
        })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!(error = %e, "Signed token with malformed subject");
        BackendError::authorization(TOKEN_INVALID)
    })?;

    let user = get_user_by_id(&app_state.db_pool, user_id)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| {
            tracing::debug!(user_id, "Token for missing or inactive user");
            BackendError::authorization(TOKEN_INVALID)
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: user.email,
        first_name: user.first_name,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `auth_middleware`; elsewhere it rejects
/// with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::authorization(CREDENTIALS_MISSING)
            })?;

        Ok(AuthUser(user))
    }
}
