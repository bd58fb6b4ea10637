use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for every handler. Authorization is always checked first
/// (by the middleware), validation before any store access, and store
/// failures are logged server-side then surfaced as a generic per-operation
/// message that omits internal detail. Nothing here is retried by the
/// application; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid request")]
    InvalidRequest,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Entry not found")]
    EntryNotFound,
    /// Store failure with the operation's caller-facing message. The
    /// underlying cause was already logged where it happened.
    #[error("{0}")]
    Store(&'static str),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::EntryNotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
