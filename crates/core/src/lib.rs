//! # DocMentor Core
//!
//! Domain types, traits, and error definitions for the DocMentor document
//! assistant. This crate has **no HTTP or runtime dependencies**: it defines
//! the domain model that the provider, assistant and CLI crates build on.
//!
//! ## Layout
//!
//! - [`provider`]: the `Provider` trait every LLM backend implements
//! - [`document`]: the immutable text a session works against
//! - [`memory`]: ordered question/answer history for "ask anything" mode
//! - [`challenge`]: the quiz state machine and evaluation results
//! - [`session`]: the owned bundle of document + derived state

pub mod error;
pub mod message;
pub mod provider;
pub mod document;
pub mod memory;
pub mod challenge;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use error::{DocumentError, Error, ProviderError, Result, SessionError};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use document::{Document, DocumentSource};
pub use memory::{ChatMemory, QaPair};
pub use challenge::{ChallengeQuestion, ChallengeSession, ChallengeState, EvaluationResult};
pub use session::{AnswerResult, Session};
