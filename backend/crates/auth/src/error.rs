//! Auth Error Types
//!
//! Auth-specific error variants rendered through the unified
//! `kernel::error::AppError` response format.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signup with an email that is already registered
    #[error("User already exists")]
    UserAlreadyExists,

    /// Request field failed validation
    #[error("{0}")]
    Validation(String),

    /// Request body could not be read as JSON
    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized - No access token provided")]
    AccessTokenMissing,

    #[error("Unauthorized - Access token expired")]
    AccessTokenExpired,

    #[error("Unauthorized - Invalid access token")]
    AccessTokenInvalid,

    /// Access token is valid but its user is gone
    #[error("User not found")]
    UserNotFound,

    #[error("Access denied - Admin only")]
    AdminOnly,

    #[error("No refresh token provided")]
    RefreshTokenMissing,

    /// Bad signature, malformed or past its expiry
    #[error("Invalid or expired refresh token")]
    RefreshTokenInvalid,

    /// Verifies, but is not the token currently stored for the user
    #[error("Invalid refresh token")]
    RefreshTokenRevoked,

    /// Signing failure
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Refresh token store error
    #[error("Token store error: {0}")]
    TokenStore(#[from] redis::RedisError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserAlreadyExists | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::InvalidBody(rejection) => {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    ErrorKind::PayloadTooLarge
                } else {
                    ErrorKind::BadRequest
                }
            }
            AuthError::InvalidCredentials
            | AuthError::AccessTokenMissing
            | AuthError::AccessTokenExpired
            | AuthError::AccessTokenInvalid
            | AuthError::UserNotFound
            | AuthError::RefreshTokenMissing
            | AuthError::RefreshTokenInvalid => ErrorKind::Unauthorized,
            AuthError::AdminOnly | AuthError::RefreshTokenRevoked => ErrorKind::Forbidden,
            AuthError::Database(e) => sqlx_error_kind(e),
            AuthError::Token(_) | AuthError::TokenStore(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server errors keep their own text as the source so the response
    /// carries it under `"error"`.
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        match self {
            AuthError::Database(e) => AppError::from(e),
            other if kind.is_server_error() => {
                AppError::new(kind, other.to_string()).with_source(other)
            }
            other => AppError::new(kind, other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::TokenStore(e) => {
                tracing::error!(error = %e, "Refresh token store error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token signing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RefreshTokenRevoked => {
                tracing::warn!("Refresh attempted with a revoked token");
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
        self.into_app_error().into_response()
    }
}

/// Value objects report validation failures as client `AppError`s
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.detail())
        }
    }
}
