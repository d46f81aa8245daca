/**
 * Change Password Handler
 *
 * PUT /change-password replaces the caller's password after checking the
 * current one. Outstanding tokens are not revoked.
 */

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::backend::auth::credentials::{hash_password, verify_password};
use crate::backend::auth::handlers::types::{ChangePasswordRequest, MessageResponse};
use crate::backend::auth::users::{get_user_by_id, update_password};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::{NotificationJob, NotificationKind};
use crate::backend::server::state::AppState;
use crate::shared::error::{FieldErrors, REQUIRED};

pub const WRONG_CURRENT_PASSWORD: &str = "Current password is incorrect.";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";
pub const PASSWORD_CHANGED: &str = "Password changed successfully.";

fn required(field: &str, value: Option<String>, errors: &mut FieldErrors) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

/// Change password handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing field, wrong current password or mismatched
///   confirmation; nothing is changed
/// * `401 Unauthorized` - Missing or invalid access token (middleware)
///
/// # Example Request
///
/// ```http
/// PUT /api/v1/users/change-password HTTP/1.1
/// Authorization: Bearer <access>
/// Content-Type: application/json
///
/// {
///   "currentPassword": "secret123",
///   "newPassword": "n3w-secret",
///   "confirmNewPassword": "n3w-secret"
/// }
/// ```
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, BackendError> {
    let Json(request) = payload?;

    let mut errors = FieldErrors::new();
    let current = required("currentPassword", request.current_password, &mut errors);
    let new = required("newPassword", request.new_password, &mut errors);
    let confirm = required("confirmNewPassword", request.confirm_new_password, &mut errors);
    let (Some(current), Some(new), Some(confirm)) = (current, new, confirm) else {
        return Err(errors.into());
    };

    let user = get_user_by_id(&state.db_pool, caller.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found."))?;

    if !verify_password(&current, &user.password_hash)? {
        errors.add("currentPassword", WRONG_CURRENT_PASSWORD);
    }
    if new != confirm {
        errors.add("confirmNewPassword", PASSWORDS_DO_NOT_MATCH);
    }
    errors.into_result()?;

    let password_hash = hash_password(&new, state.config.auth.bcrypt_cost)?;
    if !update_password(&state.db_pool, user.id, &password_hash).await? {
        return Err(BackendError::not_found("User not found."));
    }

    tracing::info!(user_id = user.id, "Password changed");
    state.notifications.enqueue(NotificationJob::new(
        NotificationKind::PasswordChanged,
        user.first_name,
        user.email,
    ));

    Ok(Json(MessageResponse::new(PASSWORD_CHANGED)))
}
