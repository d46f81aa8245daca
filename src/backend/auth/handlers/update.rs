/**
 * Profile Update Handler
 *
 * PUT /update applies a partial update to the caller's profile. The body
 * is either JSON or `multipart/form-data`; the multipart form carries text
 * fields by name and the picture as a `profile_picture` file part.
 *
 * # Merge Rule
 *
 * A present, non-null field overwrites the stored value. An absent or null
 * field leaves it unchanged. Fields are validated exactly as at
 * registration, and nothing is written if any field fails.
 */

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};

use crate::backend::auth::handlers::types::{MessageResponse, ProfileUpdateRequest};
use crate::backend::auth::users::{self, ProfilePatch, CPF_TAKEN, EMAIL_TAKEN};
use crate::backend::auth::validation::{
    optional_cpf, optional_email, optional_text, validate_profile_input, NAME_MAX,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::{NotificationJob, NotificationKind};
use crate::backend::server::state::AppState;
use crate::shared::config::UploadConfig;
use crate::shared::error::FieldErrors;

pub const PROFILE_UPDATED: &str = "Profile updated successfully!";

/// Update body, from JSON or multipart
#[derive(Debug, Default)]
pub struct ProfileUpdateForm {
    pub request: ProfileUpdateRequest,
    /// Raw bytes of an uploaded `profile_picture` file part
    pub upload: Option<Vec<u8>>,
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

impl<S> FromRequest<S> for ProfileUpdateForm
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Json(request) = Json::<ProfileUpdateRequest>::from_request(req, state).await?;
            return Ok(Self { request, upload: None });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| BackendError::invalid_request(rejection.body_text()))?;

        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if name == "profile_picture" && field.file_name().is_some() {
                form.upload = Some(field.bytes().await?.to_vec());
                continue;
            }

            let value = field.text().await?;
            if !form.request.set_field(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
        Ok(form)
    }
}

fn validate_patch(form: ProfileUpdateForm, limits: &UploadConfig, errors: &mut FieldErrors) -> ProfilePatch {
    let ProfileUpdateForm { request, upload } = form;
    ProfilePatch {
        first_name: optional_text("first_name", request.first_name, NAME_MAX, errors),
        last_name: optional_text("last_name", request.last_name, NAME_MAX, errors),
        email: optional_email("email", request.email, errors),
        cpf: optional_cpf("cpf", request.cpf, errors),
        profile: validate_profile_input(request.profile, upload, limits, errors),
    }
}

/// Profile update handler
///
/// # Errors
///
/// * `400 Bad Request` - Field map of every invalid or taken field
/// * `401 Unauthorized` - Missing or invalid access token (middleware)
///
/// # Example Request
///
/// ```http
/// PUT /api/v1/users/update HTTP/1.1
/// Authorization: Bearer <access>
/// Content-Type: application/json
///
/// { "first_name": "Beatriz", "city": "Recife" }
/// ```
///
/// # Example Response
///
/// ```json
/// { "message": "Profile updated successfully!" }
/// ```
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    form: ProfileUpdateForm,
) -> Result<Json<MessageResponse>, BackendError> {
    let pool = &state.db_pool;
    let mut errors = FieldErrors::new();
    let patch = validate_patch(form, &state.config.uploads, &mut errors);

    if let Some(email) = &patch.email {
        if users::email_taken(pool, email, Some(user.user_id)).await? {
            errors.add("email", EMAIL_TAKEN);
        }
    }
    if let Some(cpf) = &patch.cpf {
        if users::cpf_taken(pool, cpf, Some(user.user_id)).await? {
            errors.add("cpf", CPF_TAKEN);
        }
    }
    errors.into_result()?;

    let first_name = patch.first_name.clone().unwrap_or(user.first_name);
    let email = patch.email.clone().unwrap_or(user.email);

    if !users::apply_profile_patch(pool, user.user_id, patch).await? {
        return Err(BackendError::not_found("User not found."));
    }

    tracing::info!(user_id = user.user_id, "Profile updated");
    state.notifications.enqueue(NotificationJob::new(
        NotificationKind::ProfileUpdated,
        first_name,
        email,
    ));

    Ok(Json(MessageResponse::new(PROFILE_UPDATED)))
}
