/**
 * Profile Detail Handler
 *
 * GET /detail returns the caller's profile. The password hash is never part
 * of the response, and a stored picture is returned inline as a data URL.
 */

use axum::{extract::State, Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserProfile;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Profile detail handler
///
/// # Example Response
///
/// ```json
/// {
///   "id": 1,
///   "email": "a@x.com",
///   "cpf": "11122233344",
///   "first_name": "Ana",
///   "last_name": "Souza",
///   "profile_picture_url": "data:image/png;base64,iVBORw0KGgo...",
///   "is_active": true,
///   "is_admin": false
/// }
/// ```
pub async fn detail(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserProfile>, BackendError> {
    let user = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found."))?;

    Ok(Json(UserProfile::from(user)))
}
