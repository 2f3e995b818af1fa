//! API error types with JSON responses.
//!
//! Client mistakes carry a message; processing failures are reported
//! uniformly and their cause only reaches the operator log.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::pipeline::processor::ProcessingError;

/// Error response body, `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Processing failed for request {request_id}: {source}")]
    Processing {
        request_id: Uuid,
        #[source]
        source: ProcessingError,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::Multipart(err) => (err.status(), err.body_text()),
            ApiError::Processing { request_id, source } => {
                tracing::error!(%request_id, error = %source, "Processing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Processing failed".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
