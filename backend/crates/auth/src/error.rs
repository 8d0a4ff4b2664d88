//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::application::validation::ValidationErrors;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message returned for every server-side failure
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration input failed validation
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Request body is not the expected JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// A non-deleted user already has this email
    #[error("User with this email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Credentials matched a banned account
    #[error("Account is banned")]
    AccountBanned,

    /// Session token missing, tampered or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    Hashing(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::AccountBanned => StatusCode::FORBIDDEN,
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::MalformedBody(_) => ErrorKind::BadRequest,
            AuthError::DuplicateEmail => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::AccountBanned => ErrorKind::Forbidden,
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Server-side failures carry a generic message only.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::new(self.kind(), self.to_string())
                .with_action("Correct the highlighted fields and try again")
                .with_details(errors.to_json()),
            AuthError::MalformedBody(_) => AppError::new(self.kind(), self.to_string())
                .with_action("Send a JSON body with Content-Type: application/json"),
            AuthError::AccountBanned => AppError::new(self.kind(), self.to_string())
                .with_action("Contact support"),
            AuthError::Hashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), INTERNAL_MESSAGE)
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountBanned => {
                tracing::warn!("Login attempt on banned account");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::validation::FieldError;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::AccountBanned.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::MalformedBody("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_status_matches_kind() {
        let errors = [
            AuthError::DuplicateEmail,
            AuthError::InvalidCredentials,
            AuthError::AccountBanned,
            AuthError::SessionInvalid,
            AuthError::Internal("x".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code());
        }
    }

    #[test]
    fn test_server_errors_are_generic() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut);
        let app = err.to_app_error();
        assert_eq!(app.message(), INTERNAL_MESSAGE);
        assert!(!app.problem_body().to_string().contains("pool"));

        let err = AuthError::Internal("users table missing column hash".into());
        assert_eq!(err.to_app_error().message(), INTERNAL_MESSAGE);
    }

    #[test]
    fn test_validation_details_in_body() {
        let errors = ValidationErrors::from(vec![FieldError::new("password", "too short")]);
        let body = AuthError::Validation(errors).to_app_error().problem_body();

        assert_eq!(body["status"], 400);
        assert_eq!(body["errors"][0]["field"], "password");
        assert_eq!(body["errors"][0]["message"], "too short");
    }
}
