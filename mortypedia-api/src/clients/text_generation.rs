//! Text generation through an OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo-16k-0613";

#[derive(Debug, thiserror::Error)]
pub enum TextGenerationError {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("text generation is not configured")]
    NotConfigured,
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Trait for producing prose from a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends a single user prompt and returns the generated text.
    ///
    /// An empty completion is returned as an empty string, not an error.
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

impl ChatCompletionResponse {
    fn into_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }
}

/// Production generator calling the chat-completions API.
pub struct OpenAiTextGenerator {
    url: String,
    api_key: String,
    model: String,
    client: ReqwestClient,
}

impl OpenAiTextGenerator {
    pub fn new(url: &str, api_key: &str, model: &str) -> Self {
        OpenAiTextGenerator {
            url: url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: ReqwestClient::new(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            stream: false,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TextGenerationError::Upstream(format!("{status}: {body}")));
        }

        let completion = response.json::<ChatCompletionResponse>().await?;
        let text = completion.into_text();
        debug!(model = %self.model, chars = text.len(), "Generated text");
        Ok(text)
    }
}

/// Generator used when no API key is configured; every call fails.
pub struct DisabledTextGenerator;

#[async_trait]
impl TextGenerator for DisabledTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, TextGenerationError> {
        Err(TextGenerationError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest {
            model: DEFAULT_OPENAI_MODEL,
            stream: false,
            messages: vec![ChatMessage { role: "user", content: "hello" }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "gpt-3.5-turbo-16k-0613",
                "stream": false,
                "messages": [{ "role": "user", "content": "hello" }]
            })
        );
    }

    #[test]
    fn test_first_choice_is_used() {
        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Rick is a scientist." } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }))
        .unwrap();

        assert_eq!(response.into_text(), "Rick is a scientist.");
    }

    #[test]
    fn test_missing_content_is_empty_text() {
        let response: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert_eq!(response.into_text(), "");

        let response: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{ "message": { "content": null } }]
        }))
        .unwrap();
        assert_eq!(response.into_text(), "");
    }

    #[tokio::test]
    async fn test_disabled_generator_fails() {
        let err = DisabledTextGenerator.generate("anything").await.unwrap_err();
        assert!(matches!(err, TextGenerationError::NotConfigured));
    }
}
