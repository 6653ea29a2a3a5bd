// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::db::DataError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    /// Input rejected before any delegation; the message is shown to the caller.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// A data-service call failed. `message` is caller-facing, `details` is
    /// the raw rendering of the underlying failure.
    #[error("{message}")]
    Delegation { message: String, details: String },

    /// Failure whose cause is logged but never exposed.
    #[error("{0}")]
    Opaque(&'static str),

    #[error("Meal optimizer error: {0}")]
    Optimizer(String),
}

impl AppError {
    /// Build a delegation error, falling back to `fallback` when the failure
    /// carries no usable message.
    pub fn delegation(err: &DataError, fallback: &str) -> Self {
        let message = err
            .message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string();

        AppError::Delegation {
            message,
            details: err.to_string(),
        }
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
        let (status, error, details) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string(), None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Delegation { message, details } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(details))
            }
            AppError::Opaque(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string(), None),
            AppError::Optimizer(msg) => {
                (StatusCode::BAD_GATEWAY, "optimizer_error".to_string(), Some(msg))
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
