//! Single-turn text completion over any [`Provider`].

use std::sync::Arc;

use docmentor_config::AppConfig;
use docmentor_core::error::ProviderError;
use docmentor_core::provider::{Provider, ProviderRequest};
use tracing::debug;

/// Sends one prompt, returns one completion. Each call is independent: no
/// caching and no retries, so failures surface to the caller immediately.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
        }
    }

    /// A client using the model settings from `config`.
    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Self {
        Self {
            provider,
            model: config.model().to_string(),
            temperature: config.default_temperature,
            max_tokens: Some(config.default_max_tokens),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut request = ProviderRequest::single_turn(&self.model, prompt);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        debug!(
            provider = self.provider.name(),
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending completion request"
        );

        let response = self.provider.complete(request).await?;

        if let Some(usage) = &response.usage {
            debug!(
                provider = self.provider.name(),
                model = %response.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Completion usage"
            );
        }

        Ok(response.message.content)
    }
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("provider", &self.provider.name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
