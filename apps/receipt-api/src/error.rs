//! # API Error Type
//!
//! Maps use-case errors onto HTTP responses.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow at the HTTP Edge                          │
//! │                                                                         │
//! │  ReceiptService                                                        │
//! │  Result<T, ReceiptError>                                               │
//! │         │                                                               │
//! │         ├── Validation / DuplicateReceipt ──┐                          │
//! │         ├── NotFound / InvalidUrl ──────────┼──► 400 {"message": ...}  │
//! │  JsonRejection (bad body) ──────────────────┘                          │
//! │         │                                                               │
//! │         └── Internal { detail } ── error!(detail) ──►                  │
//! │                                    500 {"message": "Internal server    │
//! │                                              error!"}                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller never sees an internal detail; it is logged here instead.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use receipt_core::ReceiptError;
use serde::Serialize;
use tracing::error;

/// An error response: status plus `{"message": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status sent to the caller
    pub status: StatusCode,

    /// Human-readable message, exactly as the caller sees it
    pub message: String,
}

/// Wire shape of every error body.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl ApiError {
    /// Creates a 400 error with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ReceiptError> for ApiError {
    fn from(err: ReceiptError) -> Self {
        if err.is_client_error() {
            return ApiError::bad_request(err.to_string());
        }

        if let ReceiptError::Internal { ref detail } = err {
            error!(detail = %detail, "Internal error while handling request");
        }

        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(MessageBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

/// Result type for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
