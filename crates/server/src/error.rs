//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that converts every failure at the
//! handler boundary into an HTTP status plus a terse plain-text body.
//! Server-side failures are captured to Sentry before responding.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::seclog::StorageError;
use crate::services::auth::AuthError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Security log read failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Protected action attempted without a session.
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Storage(_) | Self::Internal(_) | Self::Auth(AuthError::PasswordHash)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Auth(err) => match err {
                AuthError::MissingFields | AuthError::DuplicateEmail => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Terse, user-facing messages; never internal details
        let message = match &self {
            Self::Auth(err) => match err {
                AuthError::MissingFields => "All fields are required".to_string(),
                AuthError::DuplicateEmail => "Email already exists".to_string(),
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::PasswordHash => "Internal server error".to_string(),
            },
            Self::Storage(_) => "Error reading security logs".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Unauthorized => "Unauthorized".to_string(),
            Self::BadRequest(msg) => msg.clone(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn app_error_display() {
        let err = AppError::BadRequest("Name and email are required".to_string());
        assert_eq!(err.to_string(), "Bad request: Name and email are required");
    }

    #[test]
    fn auth_errors_map_to_client_statuses() {
        assert_eq!(
            get_status(AppError::Auth(AuthError::MissingFields)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::DuplicateEmail)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn server_side_errors_are_500() {
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::PasswordHash)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unauthorized_is_401() {
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
    }
}
