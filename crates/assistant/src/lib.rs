//! The DocMentor assistant: everything between the user's action and the
//! completion provider.
//!
//! ```text
//! Assistant ──► prompts ──► CompletionClient ──► parser / snippet ──► result
//! ```
//!
//! The model does all the reading; this crate builds its prompts, recovers
//! structure from whatever text comes back, and finds document excerpts that
//! back up the answers.

pub mod assistant;
pub mod completion;
pub mod loader;
pub mod parser;
pub mod prompts;
pub mod similarity;
pub mod snippet;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use assistant::{Assistant, AssistantSettings, GenerateOutcome};
pub use completion::CompletionClient;
pub use parser::ModelOutput;
