use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::UpstreamError;

/// Every way a studio request can fail. Rendered as `{ "error": message }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("OpenAI API key is not configured")]
    NotConfigured,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// Upstream succeeded but handed back nothing usable.
    #[error("{0}")]
    EmptyResult(String),
    #[error("Request exceeded the {0}s time budget")]
    Timeout(u64),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(e) => e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::NotConfigured | AppError::EmptyResult(_) | AppError::Timeout(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::Upstream(UpstreamError::Api { status, message }) if message.is_empty() => match status {
                401 => "Invalid OpenAI API Key".to_string(),
                429 => "OpenAI rate limit exceeded or insufficient credits".to_string(),
                other => format!("OpenAI request failed with status {other}"),
            },
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { error: self.message() })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::Validation("Request body exceeds the upload limit".to_string());
        }
        AppError::Validation(rejection.body_text())
    }
}

/// `Json` extractor whose rejections use the studio error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
