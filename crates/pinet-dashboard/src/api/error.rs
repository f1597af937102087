//! API error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// JSON body shared by the status and wake endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// `online`, `offline`, `success` or `error`
    pub status: String,
    /// Detail text, absent for status checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    /// A body with only a status
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: None,
        }
    }

    /// A body with a status and message
    pub fn with_message(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: Some(message.into()),
        }
    }
}

/// Wrapper for API errors with status codes
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: ApiResponse,
}

impl AppError {
    /// A `500` carrying `message`
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ApiResponse::with_message("error", message),
        }
    }

    /// A `400` carrying `message`
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiResponse::with_message("error", message),
        }
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        tracing::warn!(error = %err, "PiNet request failed");
        Self::internal(err.to_string())
    }
}

impl From<pinet_client::ClientError> for AppError {
    fn from(err: pinet_client::ClientError) -> Self {
        DashboardError::from(err).into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
