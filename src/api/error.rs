//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;
use crate::model::ModelError;
use crate::ocr::OcrError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    UnknownCategory(String),
    #[error("{0}")]
    UnknownDisease(String),
    #[error("No readable text found on the image")]
    EmptyExtraction,
    #[error("Text recognition is unavailable: {0}")]
    OcrUnavailable(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::InvalidInput(detail) => (
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                detail.clone(),
            ),
            ApiError::UnknownCategory(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNKNOWN_CATEGORY",
                detail.clone(),
            ),
            ApiError::UnknownDisease(detail) => {
                tracing::error!(detail, "Predicted disease missing from reference table");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UNKNOWN_DISEASE",
                    detail.clone(),
                )
            }
            ApiError::EmptyExtraction => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_EXTRACTION",
                "No readable text found on the image. Try a sharper photo.".to_string(),
            ),
            ApiError::OcrUnavailable(detail) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "OCR_UNAVAILABLE",
                format!("Text recognition is unavailable: {detail}"),
            ),
            ApiError::NotFound(detail) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                detail.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::UnknownCategory { .. } => ApiError::UnknownCategory(err.to_string()),
            ModelError::UnknownDisease(_) => ApiError::UnknownDisease(err.to_string()),
            // Artifact and evaluation failures never carry user input
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<OcrError> for ApiError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::Unavailable(detail) => ApiError::OcrUnavailable(detail),
            // A failing endpoint is as unavailable as an unreachable one
            OcrError::Api { .. } => ApiError::OcrUnavailable(err.to_string()),
            OcrError::EmptyExtraction => ApiError::EmptyExtraction,
            OcrError::NoMatch => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
