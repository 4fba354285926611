//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tablescope::TablescopeError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Unknown route.
    NotFound(String),
    /// Internal server error.
    Internal(String),
    /// Error from the tablescope library.
    Tablescope(TablescopeError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            ApiError::Tablescope(e) => match e {
                TablescopeError::Ingest(_) | TablescopeError::Csv(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "ingest_error")
                }
                TablescopeError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                TablescopeError::InvalidColumn { .. } => (StatusCode::NOT_FOUND, "invalid_column"),
                TablescopeError::NotNumeric { .. } => (StatusCode::BAD_REQUEST, "not_numeric"),
                TablescopeError::InvalidArgument(_) => {
                    (StatusCode::BAD_REQUEST, "invalid_argument")
                }
                TablescopeError::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, code, "request rejected");
        }

        let error = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Internal(msg) => msg,
            ApiError::Tablescope(e) => e.to_string(),
        };

        (status, Json(ErrorResponse { error, code })).into_response()
    }
}

impl From<TablescopeError> for ApiError {
    fn from(err: TablescopeError) -> Self {
        ApiError::Tablescope(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Tablescope(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}
