//! HTTP error mapping.
//!
//! Client errors render as `{ "message": ... }`. Anything unexpected is
//! logged and rendered as `{ "message": "Something went wrong!", "error": ... }`
//! with status 500.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tcc_auth::AuthError;
use tcc_db::error::DatabaseError;
use thiserror::Error;

pub const INTERNAL_MESSAGE: &str = "Something went wrong!";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Internal(error) => {
                tracing::error!(%error, "request failed");
                json!({ "message": INTERNAL_MESSAGE, "error": error })
            }
            other => json!({ "message": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { .. } => Self::NotFound(error.to_string()),
            DatabaseError::Conflict(message) | DatabaseError::InvalidState(message) => {
                Self::Conflict(message)
            }
            DatabaseError::InvalidReference(message) => Self::BadRequest(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::NotAuthenticated
            | AuthError::TokenExpired
            | AuthError::InvalidToken(_)
            | AuthError::Decode(_)
            | AuthError::InvalidCredentials => Self::Unauthorized(error.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {error}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DatabaseError::NotFound { entity: "Truck", id: "trk-1".into() }, StatusCode::NOT_FOUND)]
    #[case(DatabaseError::Conflict("dup".into()), StatusCode::CONFLICT)]
    #[case(DatabaseError::InvalidState("busy".into()), StatusCode::CONFLICT)]
    #[case(DatabaseError::InvalidReference("branchId".into()), StatusCode::BAD_REQUEST)]
    #[case(DatabaseError::NoResult, StatusCode::INTERNAL_SERVER_ERROR)]
    fn database_errors_map_to_status(#[case] error: DatabaseError, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(error).status(), expected);
    }

    #[test]
    fn auth_failures_are_unauthorized() {
        assert_eq!(
            ApiError::from(AuthError::TokenExpired).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::Signing("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
