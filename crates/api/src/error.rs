//! API error types with HTTP response mapping.

use analytics::PipelineError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derived_store::StoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// A sync run is already in progress.
    SyncInProgress,
    /// The pipeline run failed.
    Pipeline(PipelineError),
    /// Reading a derived collection failed.
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::SyncInProgress => (
                StatusCode::CONFLICT,
                "a sync run is already in progress".to_string(),
            ),
            ApiError::Pipeline(err) => pipeline_error_to_response(err),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "derived store read failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn pipeline_error_to_response(err: PipelineError) -> (StatusCode, String) {
    match &err {
        PipelineError::Validation(_) | PipelineError::Engine(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        PipelineError::Persistence { .. } => {
            tracing::error!(error = %err, "persistence failure during sync");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::Pipeline(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}
