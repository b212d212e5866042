//! Anthropic Messages API adapter.

use async_trait::async_trait;
use pipeline::{LlmError, ProviderKind, ProviderSettings, TextProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{endpoint, post_json};

/// API version header value sent with every request.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Ceiling used if configuration explicitly clears `max_tokens`; the API
/// rejects requests without one.
const FALLBACK_MAX_TOKENS: u32 = 4096;

/// A connection to the Anthropic Messages API.
pub struct AnthropicProvider {
    http: reqwest::Client,
    api_key: String,
    settings: ProviderSettings,
}

impl AnthropicProvider {
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
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl TextProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: self.settings.model.as_str(),
            max_tokens: self.settings.max_tokens.unwrap_or(FALLBACK_MAX_TOKENS),
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(
            provider = "anthropic",
            model = %self.settings.model,
            max_tokens = body.max_tokens,
            prompt_len = prompt.len(),
            "sending messages request"
        );

        let request = self
            .http
            .post(endpoint(&self.settings.base_url, "messages"))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION);

        let response: MessagesResponse = post_json(request, &body).await?;

        // The first text block is the answer; tool-use blocks are never requested.
        response
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or(LlmError::EmptyResponse)
    }
}
