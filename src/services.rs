//! Seams to the two external collaborators: the description (vision/chat)
//! service and the image generation service.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(String),
    /// Upstream answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Invalid upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Status carried by the failure, if upstream reported one.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamError::Http(_) => true,
            UpstreamError::Api { status, .. } => *status == 429 || *status >= 500,
            UpstreamError::Decode(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Standard,
    Hd,
}

/// Parameters of one image generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub size: String,
    pub quality: Quality,
}

impl ImageRequest {
    pub fn square(model: &str, prompt: String, quality: Quality) -> Self {
        Self { model: model.to_string(), prompt, n: 1, size: "1024x1024".to_string(), quality }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: Option<String>,
    pub revised_prompt: Option<String>,
}

#[async_trait]
pub trait DescriptionService: Send + Sync {
    /// Sends `instruction` together with the image (data URL or remote URL)
    /// and returns the first text answer, or `None` when upstream produced none.
    async fn describe_image(&self, model: &str, instruction: &str, image: &str) -> Result<Option<String>, UpstreamError>;

    /// Asks for a strict JSON object answer and returns its raw text.
    async fn analyze_json(&self, model: &str, system: &str, user: &str) -> Result<Option<String>, UpstreamError>;
}

#[async_trait]
pub trait ImageService: Send + Sync {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, UpstreamError>;
}
