//! Configuration loading, validation, and management for DocMentor.
//!
//! Loads configuration from `~/.docmentor/config.toml` with environment
//! variable overrides. Validates all settings at startup; the resolved
//! [`AppConfig`] is then passed explicitly to whatever needs it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.docmentor/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default LLM provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per LLM response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// HTTP request timeout for completion calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Prompt and parsing heuristics
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider() -> String {
    "gemini".into()
}
fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2048
}
fn default_request_timeout_secs() -> u64 {
    120
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("assistant", &self.assistant)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

/// Tuning constants for snippet extraction and prompt assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Characters of context kept on each side of a verbatim snippet
    #[serde(default = "default_snippet_window")]
    pub snippet_window: usize,

    /// Minimum ratio a line must exceed to count as a supporting line
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Lines at or under this many trimmed characters are never candidates
    #[serde(default = "default_min_line_chars")]
    pub min_line_chars: usize,

    /// Leading answer characters searched for in sentence justification
    #[serde(default = "default_justification_prefix_chars")]
    pub justification_prefix_chars: usize,

    /// Questions requested per challenge
    #[serde(default = "default_question_count")]
    pub question_count: usize,

    /// Word cap given to the summary prompt
    #[serde(default = "default_summary_word_limit")]
    pub summary_word_limit: usize,
}

fn default_snippet_window() -> usize {
    50
}
fn default_similarity_threshold() -> f64 {
    0.3
}
fn default_min_line_chars() -> usize {
    20
}
fn default_justification_prefix_chars() -> usize {
    10
}
fn default_question_count() -> usize {
    3
}
fn default_summary_word_limit() -> usize {
    150
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            snippet_window: default_snippet_window(),
            similarity_threshold: default_similarity_threshold(),
            min_line_chars: default_min_line_chars(),
            justification_prefix_chars: default_justification_prefix_chars(),
            question_count: default_question_count(),
            summary_word_limit: default_summary_word_limit(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.docmentor/config.toml).
    ///
    /// Also checks environment variables: `DOCMENTOR_PROVIDER`,
    /// `DOCMENTOR_MODEL`, then `<PROVIDER>_API_KEY` (e.g. `GEMINI_API_KEY`)
    /// with `DOCMENTOR_API_KEY` as the fallback.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// The provider is resolved first so the key comes from that provider's
    /// own variable (`GEMINI_API_KEY`, `OPENAI_API_KEY`, ...) before the
    /// generic `DOCMENTOR_API_KEY`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(provider) = lookup("DOCMENTOR_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(model) = lookup("DOCMENTOR_MODEL") {
            self.default_model = model;
        }

        if self.api_key.is_none() {
            self.api_key = lookup(&provider_key_var(&self.default_provider))
                .or_else(|| lookup("DOCMENTOR_API_KEY"));
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".docmentor")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be > 0".into(),
            ));
        }

        let assistant = &self.assistant;
        if !(0.0..=1.0).contains(&assistant.similarity_threshold) {
            return Err(ConfigError::ValidationError(
                "assistant.similarity_threshold must be between 0.0 and 1.0".into(),
            ));
        }

        if assistant.question_count == 0 {
            return Err(ConfigError::ValidationError(
                "assistant.question_count must be > 0".into(),
            ));
        }

        if assistant.summary_word_limit == 0 {
            return Err(ConfigError::ValidationError(
                "assistant.summary_word_limit must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
            || self
                .providers
                .get(&self.default_provider)
                .is_some_and(|p| p.api_key.is_some())
    }

    /// The API key for the default provider, or [`ConfigError::MissingApiKey`].
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.providers
            .get(&self.default_provider)
            .and_then(|p| p.api_key.as_deref())
            .or(self.api_key.as_deref())
            .ok_or_else(|| ConfigError::MissingApiKey {
                provider: self.default_provider.clone(),
            })
    }

    /// The model to use for the default provider.
    pub fn model(&self) -> &str {
        self.providers
            .get(&self.default_provider)
            .and_then(|p| p.default_model.as_deref())
            .unwrap_or(&self.default_model)
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            assistant: AssistantConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
/// `gemini` -> `GEMINI_API_KEY`, `llama.cpp` -> `LLAMA_CPP_API_KEY`.
fn provider_key_var(provider: &str) -> String {
    let name: String = provider
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{name}_API_KEY")
}

fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("No API key configured for provider '{provider}'")]
    MissingApiKey { provider: String },
}
