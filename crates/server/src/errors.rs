use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::dto::MessageEnvelope;

/// Handler failures, each mapped to a fixed status and body shape.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 with a failure envelope.
    #[error("{message}")]
    Rejected { method: &'static str, message: String },
    /// 500 with a failure envelope.
    #[error("{message}")]
    Fault { method: &'static str, message: String },
    /// 500 with no body.
    #[error("internal error")]
    BareFault,
}

impl ApiError {
    pub fn invalid_input(method: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Rejected { method, message: format!("Invalid input: {detail}") }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected { method, message } => {
                (StatusCode::BAD_REQUEST, Json(MessageEnvelope::failed(method, message))).into_response()
            }
            ApiError::Fault { method, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(MessageEnvelope::failed(method, message))).into_response()
            }
            ApiError::BareFault => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
