//! The validate → describe → compose → generate skeleton shared by every studio.

use serde::de::DeserializeOwned;
use std::{future::Future, sync::Arc, time::{Duration, Instant}};
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    config::Limits,
    error::AppError,
    media,
    services::{DescriptionService, ImageRequest, ImageService, UpstreamError},
};

#[derive(Clone)]
pub struct Services {
    pub describer: Arc<dyn DescriptionService>,
    pub images: Arc<dyn ImageService>,
}

/// Trimmed field value, or `None` when absent or blank.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Limits {
    /// Optional free text, rejected when longer than the configured bound.
    pub fn text<'a>(&self, field: &str, value: &'a Option<String>) -> Result<Option<&'a str>, AppError> {
        match present(value) {
            Some(text) if text.chars().count() > self.max_input_chars => Err(AppError::Validation(format!(
                "{field} exceeds {} characters",
                self.max_input_chars
            ))),
            other => Ok(other),
        }
    }

    pub fn image<'a>(&self, value: &'a Option<String>) -> Result<Option<&'a str>, AppError> {
        match present(value) {
            Some(image) => {
                if let media::ImageSource::Inline { format, bytes } = media::inspect_image(image, self.max_image_bytes)? {
                    debug!("Inline {:?} image, {} bytes", format, bytes);
                }
                Ok(Some(image))
            }
            None => Ok(None),
        }
    }
}

/// Uses `text` verbatim when given, otherwise asks the description service
/// about `image`. The service is never called when text is present.
pub async fn resolve_description(
    services: &Services,
    model: &str,
    text: Option<&str>,
    image: Option<&str>,
    instruction: &str,
) -> Result<String, AppError> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    let image = image.ok_or_else(|| AppError::Validation("Missing image or description".into()))?;
    let description = services
        .describer
        .describe_image(model, instruction, image)
        .await?
        .ok_or_else(|| AppError::EmptyResult("The vision model returned no description".into()))?;
    info!("📝 Resolved description ({} chars)", description.len());
    Ok(description)
}

/// Asks for a JSON object and decodes it into `T`.
pub async fn analyze_structured<T: DeserializeOwned>(
    services: &Services,
    model: &str,
    system: &str,
    user: &str,
) -> Result<T, AppError> {
    let raw = services
        .describer
        .analyze_json(model, system, user)
        .await?
        .ok_or_else(|| AppError::EmptyResult("The analysis model returned no content".into()))?;
    serde_json::from_str(&raw).map_err(|e| UpstreamError::Decode(format!("analysis is not the expected JSON: {e}")).into())
}

/// Calls the image service once and returns the first result's URL.
pub async fn request_image(services: &Services, request: ImageRequest, no_output: &str) -> Result<String, AppError> {
    let results = services.images.generate(&request).await?;
    let first = results.into_iter().next().ok_or_else(|| AppError::EmptyResult(no_output.to_string()))?;
    if let Some(revised) = &first.revised_prompt {
        info!("✏️ Upstream revised the prompt: {}", revised);
    }
    first.url.ok_or_else(|| AppError::EmptyResult(no_output.to_string()))
}

/// Runs one studio request inside its time budget, with a request span and
/// outcome logging.
pub async fn within_budget<T, F>(endpoint: &'static str, budget: Duration, work: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    let request_id = Uuid::new_v4();
    let span = info_span!("studio", endpoint, %request_id);
    async move {
        let started = Instant::now();
        info!("🚀 {} request started", endpoint);
        let outcome = match tokio::time::timeout(budget, work).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(budget.as_secs())),
        };
        match &outcome {
            Ok(_) => info!("✅ {} finished in {:?}", endpoint, started.elapsed()),
            Err(e) => error!(status = %e.status(), "❌ {} failed after {:?}: {}", endpoint, started.elapsed(), e),
        }
        outcome
    }
    .instrument(span)
    .await
}
