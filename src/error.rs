// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorBody;
use crate::services::completion::LlmError;

/// Body sent back for every internal failure. Nothing else leaks to the caller.
pub const GENERIC_FAILURE: &str = "Failed to generate a response";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid query")]
    InvalidQuery,

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid question")]
    InvalidBody(#[from] JsonRejection),

    #[error("request body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("request body is null")]
    NullBody,

    #[error("completion call failed: {0}")]
    Upstream(#[from] LlmError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidQuery | AppError::BadRequest(_) | AppError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MalformedBody(_) | AppError::NullBody | AppError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status.is_server_error() {
            tracing::error!(error = %self, "failed to generate a response");
            GENERIC_FAILURE.to_string()
        } else {
            tracing::debug!(error = ?self, "rejected request");
            self.to_string()
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Failures seen by the chat widget: talking to the backend or touching the
/// session store.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("chat backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode chat backend reply: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("chat backend returned status {0}")]
    Status(u16),

    #[error("chat backend reply carried no answer")]
    MissingAnswer,

    #[error("session store I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("session store encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}
