//! Shared response types for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::auth::AuthError;
use crate::db::StoreError;

/// A JSON error response with an HTTP status.
#[derive(Debug)]
pub struct ApiErrorType {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl From<(StatusCode, &str)> for ApiErrorType {
    fn from((status, message): (StatusCode, &str)) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail: None,
        }
    }
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, message, detail): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail,
        }
    }
}

/// Maps store failures onto the error taxonomy: validation 400, conflict
/// 409, not-found 404. Raw SQLite faults become a generic 500 so internals
/// never leak to the UI layer.
impl From<StoreError> for ApiErrorType {
    fn from(err: StoreError) -> Self {
        let status = if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else if err.is_conflict() {
            StatusCode::CONFLICT
        } else if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!("Store failure: {err}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Storage failure").into();
        };

        Self {
            status,
            message: err.to_string(),
            detail: None,
        }
    }
}

impl From<AuthError> for ApiErrorType {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        let status = match err {
            AuthError::Store(inner) => return ApiErrorType::from(inner),
            AuthError::MissingField(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        };

        Self {
            status,
            message,
            detail: None,
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.message,
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}
