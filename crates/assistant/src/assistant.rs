//! The session orchestrator.
//!
//! [`Assistant`] owns one [`Session`] and runs every user action as a single
//! prompt/completion cycle. State changes only after a completion succeeds;
//! a failed call leaves memory and challenge progress exactly as they were.

use docmentor_config::AssistantConfig;
use docmentor_core::challenge::{ChallengeQuestion, ChallengeSession, EvaluationResult};
use docmentor_core::document::Document;
use docmentor_core::error::{Result, SessionError};
use docmentor_core::memory::{ChatMemory, QaPair};
use docmentor_core::session::{AnswerResult, Session};
use tracing::{info, warn};

use crate::completion::CompletionClient;
use crate::parser;
use crate::prompts;
use crate::snippet;

/// Heuristics used when building prompts and extracting snippets.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantSettings {
    pub snippet_window: usize,
    pub similarity_threshold: f64,
    pub min_line_chars: usize,
    pub justification_prefix_chars: usize,
    pub question_count: usize,
    pub summary_word_limit: usize,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            snippet_window: snippet::DEFAULT_WINDOW,
            similarity_threshold: snippet::DEFAULT_SIMILARITY_THRESHOLD,
            min_line_chars: snippet::DEFAULT_MIN_LINE_CHARS,
            justification_prefix_chars: snippet::DEFAULT_PREFIX_CHARS,
            question_count: 3,
            summary_word_limit: 150,
        }
    }
}

impl From<&AssistantConfig> for AssistantSettings {
    fn from(config: &AssistantConfig) -> Self {
        Self {
            snippet_window: config.snippet_window,
            similarity_threshold: config.similarity_threshold,
            min_line_chars: config.min_line_chars,
            justification_prefix_chars: config.justification_prefix_chars,
            question_count: config.question_count,
            summary_word_limit: config.summary_word_limit,
        }
    }
}

/// Result of asking the model for challenge questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// This many questions were stored and the challenge is at question 0.
    Ready(usize),
    /// Nothing usable came back; the parser's sentinel list is returned for
    /// display and the previous challenge state is kept.
    Degraded(Vec<ChallengeQuestion>),
}

pub struct Assistant {
    client: CompletionClient,
    settings: AssistantSettings,
    session: Session,
}

impl Assistant {
    pub fn new(client: CompletionClient, settings: AssistantSettings) -> Self {
        Self {
            client,
            settings,
            session: Session::new(),
        }
    }

    /// Make `document` current, discarding memory and challenge progress.
    pub fn load_document(&mut self, document: Document) {
        info!(chars = document.char_len(), "Document loaded, session reset");
        self.session = Session::with_document(document);
    }

    pub fn document(&self) -> Option<&Document> {
        self.session.document()
    }

    pub fn memory(&self) -> &ChatMemory {
        &self.session.memory
    }

    pub fn challenge(&self) -> &ChallengeSession {
        &self.session.challenge
    }

    /// A short plain-text summary of the loaded document.
    pub async fn summarize(&self) -> Result<String> {
        let document = self.session.require_document()?;
        let prompt = prompts::build_summary_prompt(document.text(), self.settings.summary_word_limit);
        let text = self.complete("summarize", &prompt).await?;
        Ok(parser::parse_summary(&text))
    }

    /// Answer a free-form question, replaying earlier exchanges as context.
    ///
    /// The pair is remembered only once the completion succeeded.
    pub async fn ask(&mut self, question: &str) -> Result<AnswerResult> {
        let parsed = {
            let document = self.session.require_document()?;
            let prompt = prompts::build_answer_prompt(document.text(), question, &self.session.memory);
            let text = self.complete("ask", &prompt).await?;
            parser::parse_answer(&text, document.text(), self.settings.justification_prefix_chars)
        };

        self.session
            .memory
            .push(QaPair::new(question, parsed.answer.clone()));
        info!(history = self.session.memory.len(), "Question answered");

        Ok(AnswerResult {
            answer: parsed.answer,
            justification: parsed.justification,
            memory: self.session.memory.clone(),
        })
    }

    /// The document line closest to `answer`, for answers that no sentence
    /// contains verbatim.
    pub fn supporting_line(&self, answer: &str) -> Result<String> {
        let document = self.session.require_document()?;
        Ok(snippet::best_matching_line(
            document.text(),
            answer,
            self.settings.min_line_chars,
            self.settings.similarity_threshold,
        ))
    }

    /// Ask the model for a fresh set of challenge questions.
    pub async fn generate_challenge(&mut self) -> Result<GenerateOutcome> {
        let questions = {
            let document = self.session.require_document()?;
            let prompt = prompts::build_question_generation_prompt(document.text(), self.settings.question_count);
            let text = self.complete("generate_challenge", &prompt).await?;
            parser::parse_questions(&text)
        };

        if questions.iter().any(ChallengeQuestion::is_sentinel) {
            warn!("Question generation degraded, keeping previous challenge state");
            return Ok(GenerateOutcome::Degraded(questions));
        }

        let count = questions.len();
        self.session.challenge.start(questions);
        Ok(GenerateOutcome::Ready(count))
    }

    pub fn current_question(&self) -> Option<&ChallengeQuestion> {
        self.session.challenge.current_question()
    }

    /// Grade `answer` against the current question, then move to the next one
    /// (or complete the challenge).
    pub async fn submit_challenge_answer(&mut self, answer: &str) -> Result<EvaluationResult> {
        let evaluation = {
            let document = self.session.require_document()?;
            let question = self
                .session
                .challenge
                .current_question()
                .ok_or(SessionError::NoActiveQuestion)?;
            let prompt = prompts::build_evaluation_prompt(&question.question, answer, &question.answer);
            let text = self.complete("evaluate", &prompt).await?;
            parser::parse_evaluation(&text, document.text(), &question.answer, self.settings.snippet_window)
        };

        let state = self.session.challenge.advance();
        info!(
            answered = self.session.challenge.answered(),
            total = self.session.challenge.questions().len(),
            ?state,
            "Challenge answer graded"
        );
        Ok(evaluation)
    }

    /// Drop all challenge questions and progress.
    pub fn reset_challenge(&mut self) {
        info!("Challenge reset");
        self.session.challenge.reset();
    }

    async fn complete(&self, operation: &'static str, prompt: &str) -> Result<String> {
        self.client.complete(prompt).await.map_err(|e| {
            warn!(operation, error = %e, "Completion failed");
            e.into()
        })
    }
}
