use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::services::{DescriptionService, GeneratedImage, ImageRequest, ImageService, UpstreamError};

const BACKOFF_BASE_MS: u64 = 500;
const BACKOFF_MAX_MS: u64 = 30_000;
const LOG_PREVIEW_CHARS: usize = 300;

// Shortens inline image payloads so request bodies stay readable in logs
fn truncate_data_urls_in_json(value: &mut Value) {
    match value {
        Value::String(s) if s.starts_with("data:") && s.chars().count() > 100 => {
            let kept: String = s.chars().take(50).collect();
            *s = format!("{}...[truncated {} chars]", kept, s.chars().count() - 50);
        }
        Value::Object(map) => map.values_mut().for_each(truncate_data_urls_in_json),
        Value::Array(arr) => arr.iter_mut().for_each(truncate_data_urls_in_json),
        _ => {}
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > LOG_PREVIEW_CHARS {
        format!("{}...", text.chars().take(LOG_PREVIEW_CHARS).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Thin client over the OpenAI chat completions and images endpoints.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration, max_retries: u32) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Http(e.to_string()))?;
        Ok(Self { client, api_key, base_url, max_retries })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<String, UpstreamError> {
        let mut attempt = 0;
        loop {
            match self.post_once(path, body).await {
                Err(e) if attempt < self.max_retries && e.is_transient() => {
                    let delay = backoff(attempt);
                    warn!("🔄 {} failed ({}), retrying in {:?}", path, e, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn post_once(&self, path: &str, body: &Value) -> Result<String, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);

        let mut logged = body.clone();
        truncate_data_urls_in_json(&mut logged);
        info!("📤 POST {} {}", url, preview(&logged.to_string()));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| UpstreamError::Http(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| UpstreamError::Http(e.to_string()))?;
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            error!("❌ API error response: {}", preview(&text));
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: api_error_message(&text).unwrap_or_default(),
            });
        }
        Ok(text)
    }

    async fn chat(&self, body: Value) -> Result<Option<String>, UpstreamError> {
        let text = self.post("/chat/completions", &body).await?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| UpstreamError::Decode(format!("chat completion: {e}")))?;
        Ok(first_content(parsed))
    }
}

fn backoff(attempt: u32) -> Duration {
    let jitter = rand::thread_rng().gen_range(0..BACKOFF_BASE_MS / 2);
    let exponential = BACKOFF_BASE_MS.saturating_mul(2u64.saturating_pow(attempt)).min(BACKOFF_MAX_MS);
    Duration::from_millis(exponential + jitter)
}

#[async_trait]
impl DescriptionService for OpenAiClient {
    async fn describe_image(&self, model: &str, instruction: &str, image: &str) -> Result<Option<String>, UpstreamError> {
        info!("🔍 Describing image with {}", model);
        self.chat(json!({
            "model": model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": instruction },
                    { "type": "image_url", "image_url": { "url": image } }
                ]
            }]
        }))
        .await
    }

    async fn analyze_json(&self, model: &str, system: &str, user: &str) -> Result<Option<String>, UpstreamError> {
        info!("🧠 Requesting structured analysis from {}", model);
        self.chat(json!({
            "model": model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "response_format": { "type": "json_object" }
        }))
        .await
    }
}

#[async_trait]
impl ImageService for OpenAiClient {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, UpstreamError> {
        info!("🎨 Generating image with {} ({:?})", request.model, request.quality);
        let body = serde_json::to_value(request).map_err(|e| UpstreamError::Decode(e.to_string()))?;
        let text = self.post("/images/generations", &body).await?;
        let parsed: ImagesResponse =
            serde_json::from_str(&text).map_err(|e| UpstreamError::Decode(format!("images response: {e}")))?;
        Ok(parsed
            .data
            .into_iter()
            .map(|d| GeneratedImage { url: d.url, revised_prompt: d.revised_prompt })
            .collect())
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: ChatMessage,
}

#[derive(Debug, Deserialize, Default)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

fn first_content(resp: ChatResponse) -> Option<String> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.is_empty())
}
