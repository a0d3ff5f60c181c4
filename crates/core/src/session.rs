//! Per-user session state: the loaded document plus everything derived from it.

use serde::{Deserialize, Serialize};
use crate::challenge::ChallengeSession;
use crate::document::Document;
use crate::error::SessionError;
use crate::memory::ChatMemory;

/// The owned state of one user session.
///
/// Memory and challenge progress only make sense for the document they were
/// built against, so the only way to change the document is to build a whole
/// new `Session`.
#[derive(Debug, Clone, Default)]
pub struct Session {
    document: Option<Document>,
    pub memory: ChatMemory,
    pub challenge: ChallengeSession,
}

impl Session {
    /// An empty session with no document loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session over `document` with empty memory and no challenge.
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Some(document),
            memory: ChatMemory::new(),
            challenge: ChallengeSession::new(),
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// The loaded document, or [`SessionError::DocumentMissing`].
    pub fn require_document(&self) -> Result<&Document, SessionError> {
        self.document.as_ref().ok_or(SessionError::DocumentMissing)
    }
}

/// Outcome of one "ask anything" question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub justification: String,
    /// Memory snapshot including the pair just answered.
    pub memory: ChatMemory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::ChallengeQuestion;
    use crate::memory::QaPair;

    #[test]
    fn empty_session_requires_document() {
        let session = Session::new();
        assert_eq!(session.require_document(), Err(SessionError::DocumentMissing));
    }

    #[test]
    fn replacing_document_drops_derived_state() {
        let mut session = Session::with_document(Document::pasted("First text.").unwrap());
        session.memory.push(QaPair::new("Q", "A"));
        session
            .challenge
            .start(vec![ChallengeQuestion::new("What?", "This")]);

        session = Session::with_document(Document::pasted("Second text.").unwrap());

        assert_eq!(session.require_document().unwrap().text(), "Second text.");
        assert!(session.memory.is_empty());
        assert!(session.challenge.questions().is_empty());
    }
}
