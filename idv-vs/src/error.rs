//! Error types for idv-vs
//!
//! Only malformed input ever reaches the client as a non-200 response;
//! analysis failures degrade inside the adapters and never surface here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required document upload missing (400 with diagnostic payload)
    #[error("Se requieren idCardFront e idCardBack")]
    MissingDocuments {
        /// Multipart field names that did arrive
        received_files: Vec<String>,
        /// Request Content-Length header, when parseable
        content_length: Option<u64>,
    },

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// idv-common error
    #[error("Common error: {0}")]
    Common(#[from] idv_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingDocuments {
                received_files,
                content_length,
            } => {
                let body = Json(json!({
                    "success": false,
                    "message": "Se requieren idCardFront e idCardBack",
                    "received_files": received_files,
                    "content_length": content_length,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
            ApiError::Internal(msg) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &msg),
            ApiError::Common(err) => match err {
                idv_common::Error::InvalidInput(msg) => {
                    error_response(StatusCode::BAD_REQUEST, &msg)
                }
                other => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
            },
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({
        "success": false,
        "message": message,
    }));
    (status, body).into_response()
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
