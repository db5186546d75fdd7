//! Mapping of failures to HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Body of every error response (and of plain confirmations).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    /// Human-readable text naming the offending identifiers.
    pub message: String,
}

/// Errors returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// An operation failed.
    Core(rollcall_core::Error),
    /// The request could not be parsed.
    BadRequest(String),
}

impl From<rollcall_core::Error> for ApiError {
    fn from(err: rollcall_core::Error) -> Self {
        Self::Core(err)
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

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Core(err) if err.is_client_error() => {
                warn!("Request rejected: {err}");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Core(err) => {
                error!("Store failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Self::BadRequest(message) => {
                warn!("Malformed request: {message}");
                (StatusCode::BAD_REQUEST, message)
            }
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}
