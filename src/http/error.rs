//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{ChartError, ErrorKind};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Body missing, not JSON, or missing a required field
    BadRequest(String),
    /// Chart computation failed
    Chart(ChartError),
    /// The blocking task running the computation died
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Chart(e) => match e.kind() {
                ErrorKind::MalformedInput => StatusCode::BAD_REQUEST,
                ErrorKind::EngineUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::EngineFailure => StatusCode::BAD_GATEWAY,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "MALFORMED_INPUT",
            AppError::Chart(e) => match e.kind() {
                ErrorKind::MalformedInput => "MALFORMED_INPUT",
                ErrorKind::EngineUnavailable => "EPHEMERIS_UNAVAILABLE",
                ErrorKind::EngineFailure => "ENGINE_FAILURE",
                ErrorKind::Internal => "INTERNAL_ERROR",
            },
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::BadRequest(msg) | AppError::Internal(msg) => msg.clone(),
            AppError::Chart(e) => e.to_string(),
        };

        if status.is_server_error() {
            error!(%status, %message, "chart request failed");
        } else {
            warn!(%status, %message, "chart request rejected");
        }

        (status, Json(ApiError::new(self.code(), message))).into_response()
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        AppError::Chart(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
