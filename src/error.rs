// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Errors raised while ingesting samples or touching a recording session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Sample at {timestamp} is earlier than the last recorded sample at {last}")]
    NonChronologicalSample { timestamp: String, last: String },

    #[error("Session not found: {0}")]
    SessionNotFound(u64),

    #[error("Session {0} is stopped; its track is frozen")]
    SessionStopped(u64),
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Track(#[from] TrackError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
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
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Track(err) => {
                let (status, code) = match err {
                    TrackError::InvalidCoordinate { .. } => {
                        (StatusCode::BAD_REQUEST, "invalid_coordinate")
                    }
                    TrackError::NonChronologicalSample { .. } => {
                        (StatusCode::BAD_REQUEST, "non_chronological_sample")
                    }
                    TrackError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                    TrackError::SessionStopped(_) => (StatusCode::CONFLICT, "session_stopped"),
                };
                (status, code, Some(err.to_string()))
            }
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
