/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses and maps the
 * extractor rejections axum produces into the same taxonomy, so every error
 * body the service emits is JSON.
 *
 * # Response Format
 *
 * Field validation failures render the field map itself:
 * ```json
 * { "email": ["Enter a valid email address."] }
 * ```
 *
 * Everything else renders a single detail:
 * ```json
 * { "detail": "Invalid email or password." }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    extract::multipart::MultipartError,
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!(error = %self, "Request failed with server error");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        match self {
            BackendError::Validation(errors) => (status, Json(errors)).into_response(),
            other => {
                let body = serde_json::json!({ "detail": other.message() });
                (status, Json(body)).into_response()
            }
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected JSON body");
        BackendError::invalid_request(rejection.body_text())
    }
}

impl From<MultipartError> for BackendError {
    fn from(error: MultipartError) -> Self {
        tracing::debug!(error = %error, "Rejected multipart body");
        BackendError::invalid_request(error.body_text())
    }
}
