//! Server error types.

use api_types::{ErrorResponse, InputError};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entities::{RecordError, TimetableError};
use projection::ProjectionError;
use record_store::RecordStoreError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Missing or malformed request fields.
    #[error("{0}")]
    Validation(String),

    /// Request conflicts with existing state (taken username, repeated mark).
    #[error("{0}")]
    Conflict(String),

    /// Resource not found or not owned by the caller.
    #[error("{0}")]
    NotFound(String),

    /// No bearer token supplied.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Bearer token is invalid or expired.
    #[error("Invalid or expired token")]
    InvalidCredential,

    /// Wrong username, email or password.
    #[error("Invalid credentials")]
    InvalidLogin,

    /// Storage error.
    #[error("Database error: {0}")]
    Database(#[from] RecordStoreError),

    /// Authentication error.
    #[error("Auth error: {0}")]
    Auth(#[from] auth::AuthError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<InputError> for ServerError {
    fn from(e: InputError) -> Self {
        ServerError::Validation(e.to_string())
    }
}

impl From<ProjectionError> for ServerError {
    fn from(e: ProjectionError) -> Self {
        ServerError::Validation(e.to_string())
    }
}

impl From<TimetableError> for ServerError {
    fn from(e: TimetableError) -> Self {
        ServerError::Validation(e.to_string())
    }
}

impl From<RecordError> for ServerError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::DuplicateMark { .. } => ServerError::Conflict(e.to_string()),
            RecordError::Projection(_) => ServerError::Validation(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Validation(msg) | ServerError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ServerError::InvalidLogin => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::AuthenticationRequired => (StatusCode::UNAUTHORIZED, self.to_string()),
            ServerError::InvalidCredential => (StatusCode::FORBIDDEN, self.to_string()),
            ServerError::Database(RecordStoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Record not found".to_string())
            }
            ServerError::Database(RecordStoreError::AlreadyExists { .. }) => {
                (StatusCode::BAD_REQUEST, "Resource already exists".to_string())
            }
            ServerError::Auth(
                auth::AuthError::TokenExpired
                | auth::AuthError::InvalidToken
                | auth::AuthError::JwtValidation(_),
            ) => (StatusCode::FORBIDDEN, "Invalid or expired token".to_string()),
            ServerError::Database(_) | ServerError::Auth(_) | ServerError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServerError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (ServerError::Conflict("dup".into()), StatusCode::BAD_REQUEST),
            (ServerError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (ServerError::AuthenticationRequired, StatusCode::UNAUTHORIZED),
            (ServerError::InvalidCredential, StatusCode::FORBIDDEN),
            (
                ServerError::Database(RecordStoreError::not_found("AttendanceRecord", "x")),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::Database(RecordStoreError::Corrupt("row".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_duplicate_mark_is_conflict() {
        let error = ServerError::from(RecordError::DuplicateMark {
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            period: 1,
        });
        assert!(matches!(error, ServerError::Conflict(_)));
    }
}
