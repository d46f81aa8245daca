/**
 * Account Deletion Handler
 *
 * DELETE /delete removes the caller's account permanently. The farewell
 * email is addressed with the identity captured by the auth middleware,
 * since the row is gone by the time the job runs.
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::users::delete_user;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::{NotificationDispatcher, NotificationJob, NotificationKind};
use sqlx::SqlitePool;

pub const USER_DELETED: &str = "User deleted successfully!";
pub const DELETE_FAILED: &str = "Unable to delete account.";

/// Delete account handler
///
/// Answers 204; the `{message}` body is produced for clients that read it
/// regardless of status.
///
/// # Errors
///
/// * `401 Unauthorized` - Missing or invalid access token (middleware)
/// * `500 Internal Server Error` - `{"detail": "Unable to delete account."}`
pub async fn delete_account(
    State(pool): State<SqlitePool>,
    State(notifications): State<NotificationDispatcher>,
    AuthUser(user): AuthUser,
) -> Result<(StatusCode, Json<MessageResponse>), BackendError> {
    let deleted = delete_user(&pool, user.user_id)
        .await
        .map_err(|e| BackendError::internal_with(DELETE_FAILED, e))?;
    if !deleted {
        return Err(BackendError::internal_with(
            DELETE_FAILED,
            format!("no row deleted for user {}", user.user_id),
        ));
    }

    tracing::info!(user_id = user.user_id, "Account deleted");
    notifications.enqueue(NotificationJob::new(
        NotificationKind::AccountDeleted,
        user.first_name,
        user.email,
    ));

    Ok((StatusCode::NO_CONTENT, Json(MessageResponse::new(USER_DELETED))))
}
