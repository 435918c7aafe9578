// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// User-supplied numeric text failed to parse or was negative.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Index {index} out of range (0..{len})")]
    InvalidIndex { index: usize, len: usize },

    #[error("Date {date} is a {actual} day, not {expected}")]
    DayMismatch {
        date: chrono::NaiveDate,
        expected: String,
        actual: String,
    },

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Failed to send message: {0}")]
    SendFailure(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for rejected toggles that should be acknowledged as a no-op.
    pub fn is_rejected_toggle(&self) -> bool {
        matches!(
            self,
            AppError::InvalidIndex { .. } | AppError::DayMismatch { .. }
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidNumber(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_number",
                Some(msg.clone()),
            ),
            AppError::InvalidIndex { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_index",
                Some(self.to_string()),
            ),
            AppError::DayMismatch { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "day_mismatch",
                Some(self.to_string()),
            ),
            AppError::ExternalService(msg) => {
                (StatusCode::BAD_GATEWAY, "external_service", Some(msg.clone()))
            }
            AppError::SendFailure(msg) => {
                (StatusCode::BAD_GATEWAY, "send_failure", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
