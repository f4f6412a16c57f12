//! # API Errors
//!
//! Client-facing failures of the movie routes and their HTTP mapping:
//! - Validation -> 400 `{ "error": [violations] }`
//! - NotFound   -> 404 `{ "message": "Movie not found" }`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::schema::{FieldViolation, ValidationError};

pub const NOT_FOUND_MESSAGE: &str = "Movie not found";

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Payload failed the movie schema
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No movie with the requested id
    #[error("Movie not found")]
    NotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// 400 body
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: Vec<FieldViolation>,
}

/// Body carrying a single message (404s, delete confirmation)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(err) => (
                status,
                Json(ValidationErrorResponse {
                    error: err.into_violations(),
                }),
            )
                .into_response(),
            ApiError::NotFound => (status, Json(MessageResponse::new(NOT_FOUND_MESSAGE))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PathSegment, ViolationCode};

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        let err = ApiError::from(ValidationError::malformed_body("bad"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_body_shape() {
        let body = ValidationErrorResponse {
            error: vec![FieldViolation::new(
                ViolationCode::Required,
                vec![PathSegment::Key("title".to_string())],
                "Movie title is required",
            )],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["error"][0]["path"][0], "title");
        assert_eq!(value["error"][0]["code"], "required");
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(ApiError::NotFound.to_string(), NOT_FOUND_MESSAGE);
    }
}
