/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the authentication service.
 * Handlers return `BackendError` and never panic on bad input; the error
 * kind alone decides the HTTP status and the shape of the response body.
 *
 * # Error Categories
 *
 * | Kind | Status | Body |
 * |---|---|---|
 * | `Validation` | 400 | `{field: [messages]}` |
 * | `InvalidRequest` | 400 | `{detail}` |
 * | `Authentication` | 401 | `{detail}` |
 * | `Authorization` | 401 | `{detail}` |
 * | `NotFound` | 404 | `{detail}` |
 * | `Internal`, `Database`, `Hashing` | 500 | generic `{detail}` |
 *
 * Internal causes are logged when the response is built and never reach
 * the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::FieldErrors;

/// Detail returned for every 5xx response
pub const GENERIC_SERVER_ERROR: &str = "A server error occurred.";

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more fields failed validation
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Malformed request that is not tied to a single field
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Bad or missing credentials
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Missing, malformed or expired bearer token
    #[error("authorization failed: {0}")]
    Authorization(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Unexpected failure; `public` is what the client sees
    #[error("internal error: {cause}")]
    Internal {
        public: String,
        cause: String,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Hashing(#[from] bcrypt::BcryptError),
}

impl BackendError {
    /// Validation error holding a single field message
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Internal error with the generic public message
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        Self::Internal {
            public: GENERIC_SERVER_ERROR.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Internal error with a caller-chosen public message
    pub fn internal_with(public: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Internal {
            public: public.into(),
            cause: cause.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) | Self::Authorization(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } | Self::Database(_) | Self::Hashing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the client-facing message
    ///
    /// Server-side failures collapse to their public text so that no
    /// persistence or hashing detail leaks out.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::InvalidRequest(message)
            | Self::Authentication(message)
            | Self::Authorization(message)
            | Self::NotFound(message) => message.clone(),
            Self::Internal { public, .. } => public.clone(),
            Self::Database(_) | Self::Hashing(_) => GENERIC_SERVER_ERROR.to_string(),
        }
    }

    /// Whether this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<FieldErrors> for BackendError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Startup failures of the server binary
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::shared::ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("mail transport error: {0}")]
    Mail(#[from] crate::backend::notifications::MailError),
}
