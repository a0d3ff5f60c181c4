//! Challenge mode: generated questions, their reference answers, and the
//! progress through them.
//!
//! ```text
//! NoQuestions --start--> InProgress --advance (last)--> Complete
//!      ^                     |  ^                           |
//!      |                     +--+ advance (not last)        |
//!      +----------------------reset-------------------------+
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

/// Question text of the placeholder returned when no questions could be parsed.
pub const UNPARSEABLE_QUESTION: &str = "Unable to parse valid questions";

/// Reference answer of the placeholder question.
pub const UNPARSEABLE_ANSWER: &str = "N/A";

/// A generated question with the model's reference answer.
///
/// The reference answer is only used for grading and must not be shown before
/// the user has responded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeQuestion {
    pub question: String,
    pub answer: String,
}

impl ChallengeQuestion {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// The sentinel entry signalling that generation output was unusable.
    pub fn unparseable() -> Self {
        Self::new(UNPARSEABLE_QUESTION, UNPARSEABLE_ANSWER)
    }

    pub fn is_sentinel(&self) -> bool {
        self.question == UNPARSEABLE_QUESTION
    }
}

/// Grading of one submitted answer. Not kept once the next question is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub feedback: String,
    pub justification: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeState {
    NoQuestions,
    InProgress,
    Complete,
}

/// Quiz progress. Fields change only through the methods below so that the
/// three of them always move together. Not deserializable, so every value
/// comes from [`ChallengeSession::start`] and the methods after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeSession {
    questions: Vec<ChallengeQuestion>,
    current_index: usize,
    complete: bool,
}

impl ChallengeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ChallengeState {
        if self.questions.is_empty() {
            ChallengeState::NoQuestions
        } else if self.complete {
            ChallengeState::Complete
        } else {
            ChallengeState::InProgress
        }
    }

    /// Replace the question list and restart at the first question.
    ///
    /// An empty list leaves the session in `NoQuestions`.
    pub fn start(&mut self, questions: Vec<ChallengeQuestion>) {
        info!(count = questions.len(), "Starting challenge");
        *self = Self {
            questions,
            current_index: 0,
            complete: false,
        };
    }

    /// The question awaiting an answer, if the challenge is in progress.
    pub fn current_question(&self) -> Option<&ChallengeQuestion> {
        match self.state() {
            ChallengeState::InProgress => self.questions.get(self.current_index),
            _ => None,
        }
    }

    /// Record that the current question was answered and move on.
    ///
    /// Returns the new state. Does nothing outside `InProgress`.
    pub fn advance(&mut self) -> ChallengeState {
        if self.state() != ChallengeState::InProgress {
            return self.state();
        }
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        } else {
            self.complete = true;
            info!(count = self.questions.len(), "Challenge complete");
        }
        self.state()
    }

    /// Back to `NoQuestions` with an empty list and index 0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn questions(&self) -> &[ChallengeQuestion] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// How many questions have been answered so far.
    pub fn answered(&self) -> usize {
        if self.complete {
            self.questions.len()
        } else {
            self.current_index
        }
    }
}
