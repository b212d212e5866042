//! Google Gemini `generateContent` adapter.

use async_trait::async_trait;
use pipeline::{LlmError, ProviderKind, ProviderSettings, TextProvider};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{endpoint, post_json};

/// A connection to the Gemini `generateContent` API.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    settings: ProviderSettings,
}

impl GeminiProvider {
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
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: self
                .settings
                .max_tokens
                .map(|max_output_tokens| GenerationConfig { max_output_tokens }),
        };

        debug!(
            provider = "gemini",
            model = %self.settings.model,
            prompt_len = prompt.len(),
            "sending generateContent request"
        );

        let path = format!("models/{}:generateContent", self.settings.model);
        let request = self
            .http
            .post(endpoint(&self.settings.base_url, &path))
            .header("x-goog-api-key", &self.api_key);

        let response: GenerateResponse = post_json(request, &body).await?;

        // Multi-part answers are joined, matching the SDK's `.text` accessor.
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            Err(LlmError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}
