//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting engine and internal errors to appropriate HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nutriplan_shared::NutritionError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Calculation error: {0}")]
    Calculation(#[from] NutritionError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// Every finding when validation rejected the request
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String, Vec<String>) {
        match self {
            ApiError::Calculation(err) => match err {
                NutritionError::InvalidInput(findings) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "The calculation input is invalid".to_string(),
                    findings.errors.clone(),
                ),
                NutritionError::InconsistentPlan(findings) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "CALCULATION_ERROR",
                    "The derived plan is inconsistent".to_string(),
                    findings.errors.clone(),
                ),
                NutritionError::InvalidConfig(findings) => {
                    error!(errors = ?findings.errors, "Engine misconfigured");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                        Vec::new(),
                    )
                }
                err if err.is_input_error() => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    err.to_string(),
                    Vec::new(),
                ),
                err => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "CALCULATION_ERROR",
                    err.to_string(),
                    Vec::new(),
                ),
            },
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), Vec::new()),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), Vec::new())
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    Vec::new(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
