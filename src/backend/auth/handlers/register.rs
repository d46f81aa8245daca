/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /register.
 *
 * # Registration Process
 *
 * 1. Validate every field, collecting all errors
 * 2. Check email and CPF uniqueness
 * 3. Hash the password with bcrypt
 * 4. Create the user
 * 5. Queue the welcome email
 *
 * Nothing is written unless every check passes. The response never carries
 * the password or its hash.
 */

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

use crate::backend::auth::credentials::hash_password;
use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::backend::auth::users::{self, NewUser, ProfileFields, CPF_TAKEN, EMAIL_TAKEN};
use crate::backend::auth::validation::{
    required_text, validate_cpf, validate_email, validate_profile_input, NAME_MAX,
};
use crate::backend::error::BackendError;
use crate::backend::notifications::{NotificationJob, NotificationKind};
use crate::backend::server::state::AppState;
use crate::shared::config::UploadConfig;
use crate::shared::error::{FieldErrors, REQUIRED};

pub const USER_REGISTERED: &str = "User registered successfully.";

/// Registration fields that passed format validation
///
/// Fields are `None` where validation failed; uniqueness has not been
/// checked yet.
struct RegistrationDraft {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    cpf: Option<String>,
    password: Option<String>,
    profile: ProfileFields,
}

fn required_with<F>(field: &str, value: Option<String>, errors: &mut FieldErrors, check: F) -> Option<String>
where
    F: FnOnce(&str) -> Result<String, &'static str>,
{
    match value {
        Some(raw) if !raw.trim().is_empty() => match check(&raw) {
            Ok(valid) => Some(valid),
            Err(message) => {
                errors.add(field, message);
                None
            }
        },
        _ => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

fn validate_registration(
    request: RegisterRequest,
    limits: &UploadConfig,
    errors: &mut FieldErrors,
) -> RegistrationDraft {
    let password = match request.password {
        Some(password) if !password.is_empty() => Some(password),
        _ => {
            errors.add("password", REQUIRED);
            None
        }
    };

    RegistrationDraft {
        first_name: required_text("first_name", request.first_name, NAME_MAX, errors),
        last_name: required_text("last_name", request.last_name, NAME_MAX, errors),
        email: required_with("email", request.email, errors, validate_email),
        cpf: required_with("cpf", request.cpf, errors, validate_cpf),
        password,
        profile: validate_profile_input(request.profile, None, limits, errors),
    }
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Field map naming every invalid, missing or taken field
/// * `500 Internal Server Error` - Persistence or hashing failure
///
/// # Example Request
///
/// ```http
/// POST /api/v1/users/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "first_name": "Ana",
///   "last_name": "Souza",
///   "email": "a@x.com",
///   "password": "secret123",
///   "cpf": "11122233344"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// { "message": "User registered successfully.", "id": 1, "email": "a@x.com" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), BackendError> {
    let Json(request) = payload?;
    let pool = &state.db_pool;

    let mut errors = FieldErrors::new();
    let draft = validate_registration(request, &state.config.uploads, &mut errors);

    if let Some(email) = &draft.email {
        if users::email_taken(pool, email, None).await? {
            errors.add("email", EMAIL_TAKEN);
        }
    }
    if let Some(cpf) = &draft.cpf {
        if users::cpf_taken(pool, cpf, None).await? {
            errors.add("cpf", CPF_TAKEN);
        }
    }

    let RegistrationDraft {
        first_name: Some(first_name),
        last_name: Some(last_name),
        email: Some(email),
        cpf: Some(cpf),
        password: Some(password),
        profile,
    } = draft
    else {
        return Err(errors.into());
    };
    errors.into_result()?;

    let password_hash = hash_password(&password, state.config.auth.bcrypt_cost)?;
    let user = users::create_user(
        pool,
        NewUser {
            email,
            cpf,
            password_hash,
            first_name,
            last_name,
            profile,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    state.notifications.enqueue(NotificationJob::new(
        NotificationKind::Registered,
        user.first_name.clone(),
        user.email.clone(),
    ));

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: USER_REGISTERED.to_string(),
            id: user.id,
            email: user.email,
        }),
    ))
}
