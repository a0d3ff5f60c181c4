//! Scripted provider shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docmentor_core::error::ProviderError;
use docmentor_core::message::Message;
use docmentor_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};

use crate::completion::CompletionClient;

/// Returns scripted replies in order and records every prompt it receives.
pub(crate) struct ScriptedProvider {
    replies: Mutex<Vec<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub(crate) fn new(replies: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn texts(replies: &[&str]) -> Arc<Self> {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);

        let mut replies = self.replies.lock().unwrap();
        assert!(!replies.is_empty(), "ScriptedProvider exhausted");
        let text = replies.remove(0)?;
        Ok(ProviderResponse {
            message: Message::assistant(text),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            model: request.model,
        })
    }
}

/// A client over `provider` with default model settings.
pub(crate) fn client(provider: Arc<ScriptedProvider>) -> CompletionClient {
    CompletionClient::new(provider, "test-model")
}

pub(crate) fn api_error() -> ProviderError {
    ProviderError::ApiError {
        status_code: 500,
        message: "upstream exploded".into(),
    }
}
