//! Google Gemini provider (native `generateContent` API).
//!
//! Requests go to `{base_url}/models/{model}:generateContent` with the key in
//! the `x-goog-api-key` header. Assistant messages use Gemini's `model` role.

use async_trait::async_trait;
use docmentor_core::error::ProviderError;
use docmentor_core::message::{Message, Role};
use docmentor_core::provider::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::http::{build_client, check_status, malformed, send_error, DEFAULT_TIMEOUT};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: GEMINI_BASE_URL.into(),
            api_key: api_key.into(),
            client: build_client(DEFAULT_TIMEOUT),
        }
    }

    /// Point at a different endpoint (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    fn to_api_request(request: &ProviderRequest) -> GenerateRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| Content {
                role: Some(
                    match m.role {
                        Role::User => "user",
                        Role::Assistant => "model",
                    }
                    .into(),
                ),
                parts: vec![Part {
                    text: m.content.clone(),
                }],
            })
            .collect();

        GenerateRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }

    /// Pull the text out of a response envelope.
    fn extract_text(response: &GenerateResponse) -> Result<String, ProviderError> {
        let Some(candidate) = response.candidates.first() else {
            let reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .unwrap_or_else(|| "no candidates".into());
            return Err(malformed(format!("Gemini returned no candidates: {reason}")));
        };

        let content = candidate
            .content
            .as_ref()
            .ok_or_else(|| malformed("Gemini candidate has no content"))?;

        if content.parts.is_empty() {
            return Err(malformed("Gemini candidate has no text parts"));
        }

        Ok(content.parts.iter().map(|p| p.text.as_str()).collect())
    }
}

#[async_trait]
impl docmentor_core::Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        let body = Self::to_api_request(&request);

        debug!(provider = "gemini", model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(send_error)?;

        let response = check_status(self.name(), response).await?;

        let api_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| malformed(format!("Failed to parse response: {e}")))?;

        let text = Self::extract_text(&api_response)?;

        let usage = api_response.usage_metadata.map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(ProviderResponse {
            message: Message::assistant(text),
            usage,
            model: api_response.model_version.unwrap_or(request.model),
        })
    }

    async fn list_models(&self) -> std::result::Result<Vec<String>, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut builder = self.client.get(&url).header("x-goog-api-key", &self.api_key);
            if let Some(token) = &page_token {
                builder = builder.query(&[("pageToken", token)]);
            }
            let response = builder.send().await.map_err(send_error)?;

            if !response.status().is_success() {
                return Ok(names);
            }

            let body: ModelList = response
                .json()
                .await
                .map_err(|e| malformed(format!("Failed to parse model list: {e}")))?;

            names.extend(
                body.models
                    .into_iter()
                    .map(|m| m.name.trim_start_matches("models/").to_string()),
            );

            match body.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => return Ok(names),
            }
        }
    }

    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(send_error)?;

        Ok(response.status().is_success())
    }
}

// --- Gemini API types (internal) ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}
