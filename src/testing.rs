//! Recording fakes of the external services.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::services::{DescriptionService, GeneratedImage, ImageRequest, ImageService, UpstreamError};

#[derive(Debug, Clone)]
pub enum Call {
    Describe { model: String, instruction: String, image: String },
    Analyze { model: String, system: String, user: String },
}

pub struct MockDescriber {
    answer: Result<Option<String>, (u16, String)>,
    calls: Mutex<Vec<Call>>,
}

impl MockDescriber {
    pub fn answering(text: &str) -> Self {
        Self { answer: Ok(Some(text.to_string())), calls: Mutex::default() }
    }

    pub fn silent() -> Self {
        Self { answer: Ok(None), calls: Mutex::default() }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self { answer: Err((status, message.to_string())), calls: Mutex::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn recorded(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn images_seen(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                Call::Describe { image, .. } => Some(image.clone()),
                Call::Analyze { .. } => None,
            })
            .collect()
    }

    fn reply(&self) -> Result<Option<String>, UpstreamError> {
        self.answer
            .clone()
            .map_err(|(status, message)| UpstreamError::Api { status, message })
    }
}

#[async_trait]
impl DescriptionService for MockDescriber {
    async fn describe_image(&self, model: &str, instruction: &str, image: &str) -> Result<Option<String>, UpstreamError> {
        self.calls.lock().push(Call::Describe {
            model: model.to_string(),
            instruction: instruction.to_string(),
            image: image.to_string(),
        });
        self.reply()
    }

    async fn analyze_json(&self, model: &str, system: &str, user: &str) -> Result<Option<String>, UpstreamError> {
        self.calls.lock().push(Call::Analyze {
            model: model.to_string(),
            system: system.to_string(),
            user: user.to_string(),
        });
        self.reply()
    }
}

pub struct MockImages {
    answer: Result<Vec<GeneratedImage>, (u16, String)>,
    requests: Mutex<Vec<ImageRequest>>,
}

impl MockImages {
    pub fn urls(urls: &[&str]) -> Self {
        let images = urls
            .iter()
            .map(|u| GeneratedImage { url: Some(u.to_string()), revised_prompt: None })
            .collect();
        Self { answer: Ok(images), requests: Mutex::default() }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self { answer: Err((status, message.to_string())), requests: Mutex::default() }
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests.lock().last().map(|r| r.prompt.clone())
    }
}

#[async_trait]
impl ImageService for MockImages {
    async fn generate(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>, UpstreamError> {
        self.requests.lock().push(request.clone());
        self.answer
            .clone()
            .map_err(|(status, message)| UpstreamError::Api { status, message })
    }
}
