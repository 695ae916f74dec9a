//! OpenAI-compatible chat completions client for pitch generation

use crate::config::PitchConfig;
use crate::pitch::prompt::{parse_pitch, Pitch, PitchRequest, PitchTemplate};
use crate::pitch::PitchError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-request timeout for completions
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Generates pitches through a chat completions endpoint
#[derive(Debug, Clone)]
pub struct PitchClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    template: PitchTemplate,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

impl PitchClient {
    /// Creates a client from configuration, a resolved API key and a template
    pub fn new(
        config: &PitchConfig,
        api_key: impl Into<String>,
        template: PitchTemplate,
    ) -> Result<Self, PitchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            template,
        })
    }

    /// Model name sent with each request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Renders the prompt for `request`, asks the model and parses its answer
    pub async fn generate(&self, request: &PitchRequest) -> Result<Pitch, PitchError> {
        let prompt = self.template.render(request);
        let output = self.complete(&prompt).await?;
        let pitch = parse_pitch(&output)?;

        tracing::debug!("Generated pitch for {}: {:?}", request.name, pitch.subject);
        Ok(pitch)
    }

    /// Sends a single-message chat completion and returns the trimmed reply
    pub async fn complete(&self, prompt: &str) -> Result<String, PitchError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PitchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(PitchError::EmptyResponse)
    }
}
