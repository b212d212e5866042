//! OpenAI Chat Completions adapter.

use async_trait::async_trait;
use pipeline::{LlmError, ProviderKind, ProviderSettings, TextProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{endpoint, post_json};

/// A connection to the OpenAI Chat Completions API.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    settings: ProviderSettings,
}

impl OpenAiProvider {
    /// Creates a connection using `api_key` and the fixed `settings`.
    pub fn new(api_key: impl Into<String>, settings: ProviderSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            settings,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl TextProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: self.settings.model.as_str(),
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.settings.max_tokens,
        };

        debug!(
            provider = "openai",
            model = %self.settings.model,
            prompt_len = prompt.len(),
            "sending chat completion request"
        );

        let request = self
            .http
            .post(endpoint(&self.settings.base_url, "chat/completions"))
            .bearer_auth(&self.api_key);

        let response: ChatResponse = post_json(request, &body).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}
