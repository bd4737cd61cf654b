//! Unified error handling with Sentry integration.
//!
//! All route handlers return `Result<T, AppError>`. Errors serialize as a
//! structured JSON envelope `{ "error": { "code", "message" } }` with a
//! stable machine-readable code; server errors are captured to Sentry before
//! responding and never leak internal detail to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request payload failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Conflict with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// User is not authenticated.
    #[error("Unauthorized")]
    Unauthorized,

    /// User is authenticated but not allowed.
    #[error("Forbidden")]
    Forbidden,

    /// CSRF double-submit check failed.
    #[error("Invalid CSRF token")]
    CsrfMismatch,

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl ErrorBody {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code,
                message: message.into(),
            },
        }
    }
}

impl AppError {
    /// Stable machine-readable error code for clients.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound => "NOT_FOUND",
                RepositoryError::Conflict(_) => "CONFLICT",
                RepositoryError::InvalidReference(_) => "VALIDATION_ERROR",
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    "INTERNAL_ERROR"
                }
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "UNAUTHORIZED",
                AuthError::UserAlreadyExists => "CONFLICT",
                AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => "VALIDATION_ERROR",
                AuthError::Repository(_) | AuthError::PasswordHash => "INTERNAL_ERROR",
            },
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::CsrfMismatch => "CSRF_TOKEN_MISMATCH",
            Self::RateLimited => "RATE_LIMITED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                RepositoryError::InvalidReference(_) => StatusCode::BAD_REQUEST,
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::CsrfMismatch => StatusCode::FORBIDDEN,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// Client-facing message; internal details are replaced wholesale.
    fn message(&self) -> String {
        match self {
            Self::Repository(err) => match err {
                RepositoryError::NotFound => "Resource not found".to_string(),
                RepositoryError::Conflict(msg) | RepositoryError::InvalidReference(msg) => {
                    msg.clone()
                }
                RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "Internal server error".to_string()
                }
            },
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Unauthorized => "Authentication required".to_string(),
            Self::Forbidden => "Forbidden".to_string(),
            Self::RateLimited => "Too many requests, please try again later".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody::new(self.code(), self.message());
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("supplier 7".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Validation("name is required".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Conflict("duplicate".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(get_status(AppError::CsrfMismatch), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(AppError::RateLimited),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(AppError::NotFound(String::new()).code(), "NOT_FOUND");
        assert_eq!(AppError::Validation(String::new()).code(), "VALIDATION_ERROR");
        assert_eq!(AppError::Conflict(String::new()).code(), "CONFLICT");
        assert_eq!(AppError::CsrfMismatch.code(), "CSRF_TOKEN_MISMATCH");
        assert_eq!(
            AppError::Repository(RepositoryError::NotFound).code(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn test_envelope_shape() {
        let body = ErrorBody::new("NOT_FOUND", "Resource not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Resource not found");
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let err = AppError::Internal("connection refused at 10.0.0.3".to_string());
        assert_eq!(err.message(), "Internal server error");
    }
}
