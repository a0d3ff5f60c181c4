//! Error types for the DocMentor domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Malformed model output is deliberately absent here: the response parser
//! resolves it to fallback values instead of raising.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all DocMentor operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Document errors ---
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the text-completion service: transport, auth, quota or a
/// response envelope we could not read. Never retried automatically.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No document loaded; upload a file or paste text first")]
    DocumentMissing,

    #[error("No challenge question is awaiting an answer")]
    NoActiveQuestion,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document is empty")]
    Empty,

    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to extract text from {path}: {reason}")]
    Extraction { path: PathBuf, reason: String },
}
