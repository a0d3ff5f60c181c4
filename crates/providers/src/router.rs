//! Provider router: selects the correct LLM provider based on config.
//!
//! Credentials are resolved here, once, from the loaded [`AppConfig`] and
//! injected into each provider instance.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use docmentor_config::{AppConfig, ConfigError};
use docmentor_core::provider::Provider;
use crate::gemini::{GeminiProvider, GEMINI_BASE_URL};
use crate::openai_compat::OpenAiCompatProvider;

/// Providers that run locally and accept any key.
const KEYLESS_PROVIDERS: &[&str] = &["ollama", "vllm", "llamacpp", "llama.cpp"];

/// Routes completion requests to the correct provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    /// Create a new router with a default provider.
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get the default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }
}

/// Build providers from configuration.
pub fn build_from_config(config: &AppConfig) -> ProviderRouter {
    let mut router = ProviderRouter::new(&config.default_provider);
    let timeout = Duration::from_secs(config.request_timeout_secs);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let provider = build_provider(name, provider_config.api_url.as_deref(), &api_key, timeout);
        router.register(name.clone(), provider);
    }

    // Ensure the default provider exists (even if not explicitly configured)
    if router.get(&config.default_provider).is_none() {
        let api_key = config.api_key.clone().unwrap_or_default();
        let provider = build_provider(&config.default_provider, None, &api_key, timeout);
        router.register(config.default_provider.clone(), provider);
    }

    router
}

/// The default provider, failing early when it would need a key and has none.
pub fn default_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ConfigError> {
    if !KEYLESS_PROVIDERS.contains(&config.default_provider.as_str()) {
        config.require_api_key()?;
    }

    build_from_config(config)
        .default()
        .ok_or_else(|| ConfigError::ValidationError(format!(
            "default provider '{}' could not be built",
            config.default_provider
        )))
}

fn build_provider(
    name: &str,
    api_url: Option<&str>,
    api_key: &str,
    timeout: Duration,
) -> Arc<dyn Provider> {
    if name == "gemini" {
        let mut p = GeminiProvider::new(api_key).with_timeout(timeout);
        if let Some(url) = api_url {
            p = p.with_base_url(url);
        }
        Arc::new(p)
    } else {
        let base_url = api_url.map(String::from).unwrap_or_else(|| default_base_url(name));
        Arc::new(OpenAiCompatProvider::new(name, base_url, api_key).with_timeout(timeout))
    }
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "gemini" => GEMINI_BASE_URL.into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "deepseek" => "https://api.deepseek.com/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}
