//! Error conversions
//!
//! Database error classification and the HTTP rendering of [`AppError`].

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database error
///
/// An exhausted or closed pool is 503; connection and server-side failures
/// stay 500.
#[cfg(feature = "sqlx")]
pub fn sqlx_error_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => ErrorKind::ServiceUnavailable,
        // https://www.postgresql.org/docs/current/errcodes-appendix.html
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => ErrorKind::Conflict,
            Some("23502") | Some("23514") => ErrorKind::BadRequest,
            _ => ErrorKind::InternalServerError,
        },
        _ => ErrorKind::InternalServerError,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let app_err = match sqlx_error_kind(&err) {
            ErrorKind::NotFound => AppError::not_found("Record not found"),
            ErrorKind::ServiceUnavailable => {
                AppError::service_unavailable("Database connection pool exhausted")
            }
            ErrorKind::Conflict => AppError::conflict("Duplicate key value"),
            ErrorKind::BadRequest => AppError::bad_request("Constraint violation"),
            _ => AppError::internal("Database error"),
        };
        app_err.with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

/// Response body for server-side failures
#[cfg(feature = "axum")]
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Renders `{"message": ...}` for client errors and
/// `{"message": "Server error", "error": <detail>}` for server errors.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = serde_json::Map::new();
        if self.is_server_error() {
            body.insert("message".into(), SERVER_ERROR_MESSAGE.into());
            body.insert("error".into(), self.detail().into());
        } else {
            body.insert("message".into(), self.message().into());
        }

        (status, Json(serde_json::Value::Object(body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_error_conversion() {
        let app_err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);

        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);

        let app_err: AppError = sqlx::Error::Io(std::io::Error::other("connection reset")).into();
        assert_eq!(app_err.kind(), ErrorKind::InternalServerError);
        assert!(app_err.detail().contains("connection reset"));
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = AppError::forbidden("Invalid refresh token").into_response();
        assert_eq!(response.status().as_u16(), 403);

        let response = AppError::internal("redis down").into_response();
        assert_eq!(response.status().as_u16(), 500);
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::CONTENT_TYPE)
                .unwrap(),
            "application/json"
        );
    }
}
