//! Turning completion text into typed results.
//!
//! The model is asked for JSON but does not always comply, so every parser
//! here ends in a fallback value instead of an error:
//!
//! ```text
//! questions:   strict JSON array ──► regex salvage ──► sentinel question
//! evaluation:  JSON object ──► raw text + snippet from the document
//! summary:     JSON object ──► raw text ──► "Summary not available."
//! ```

use std::sync::LazyLock;

use docmentor_core::challenge::ChallengeQuestion;
use docmentor_core::EvaluationResult;
use regex_lite::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::snippet::{extract_snippet, find_justification};

pub const DEFAULT_FEEDBACK: &str = "No feedback.";
pub const DEFAULT_JUSTIFICATION: &str = "No justification.";
pub const SUMMARY_UNAVAILABLE: &str = "Summary not available.";

/// `{"question": "...", "answer": "..."}` objects inside otherwise broken JSON.
static QUESTION_OBJECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"\{"question":\s*"(.*?)",\s*"answer":\s*"(.*?)"\}"#).ok());

/// A completion, classified once so callers never re-check its shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// The text decoded as a JSON object.
    Structured(Map<String, Value>),
    /// Anything else, kept verbatim.
    RawText(String),
}

impl ModelOutput {
    pub fn from_completion(text: &str) -> Self {
        match serde_json::from_str::<Value>(strip_code_fence(text)) {
            Ok(Value::Object(map)) => Self::Structured(map),
            _ => Self::RawText(text.to_string()),
        }
    }

    /// A field of a structured output, rendered as text.
    ///
    /// `None` for raw text, missing keys and `null`.
    pub fn field(&self, key: &str) -> Option<String> {
        let Self::Structured(map) = self else {
            return None;
        };
        match map.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Remove a surrounding markdown code fence (with or without a language tag).
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse generated challenge questions.
///
/// Always returns at least one entry; a lone [`ChallengeQuestion::unparseable`]
/// means neither JSON nor salvage produced anything.
pub fn parse_questions(text: &str) -> Vec<ChallengeQuestion> {
    if let Some(questions) = strict_questions(text) {
        debug!(count = questions.len(), tier = "strict_json", "Parsed challenge questions");
        return questions;
    }

    let salvaged = salvage_questions(text);
    if !salvaged.is_empty() {
        warn!(count = salvaged.len(), tier = "regex_salvage", "Recovered questions from malformed JSON");
        return salvaged;
    }

    warn!(tier = "sentinel", "No questions could be parsed from completion");
    vec![ChallengeQuestion::unparseable()]
}

fn strict_questions(text: &str) -> Option<Vec<ChallengeQuestion>> {
    serde_json::from_str::<Vec<ChallengeQuestion>>(strip_code_fence(text))
        .ok()
        .filter(|questions| !questions.is_empty())
}

fn salvage_questions(text: &str) -> Vec<ChallengeQuestion> {
    let Some(re) = QUESTION_OBJECT.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .map(|caps| ChallengeQuestion::new(&caps[1], &caps[2]))
        .collect()
}

/// Parse the grading of a challenge answer.
///
/// Unstructured replies become the feedback verbatim; the justification is
/// then looked up in the document around the reference answer.
pub fn parse_evaluation(
    text: &str,
    document: &str,
    correct_answer: &str,
    window: usize,
) -> EvaluationResult {
    let output = ModelOutput::from_completion(text);
    match &output {
        ModelOutput::Structured(_) => EvaluationResult {
            feedback: output.field("feedback").unwrap_or_else(|| DEFAULT_FEEDBACK.into()),
            justification: output
                .field("justification")
                .unwrap_or_else(|| DEFAULT_JUSTIFICATION.into()),
        },
        ModelOutput::RawText(raw) => {
            debug!("Evaluation was not JSON, using raw text as feedback");
            let feedback = raw.trim();
            EvaluationResult {
                feedback: if feedback.is_empty() {
                    DEFAULT_FEEDBACK.into()
                } else {
                    feedback.to_string()
                },
                justification: extract_snippet(document, correct_answer, window),
            }
        }
    }
}

/// Parse a summary completion.
pub fn parse_summary(text: &str) -> String {
    let output = ModelOutput::from_completion(text);
    match &output {
        ModelOutput::Structured(_) => output
            .field("feedback")
            .or_else(|| output.field("summary"))
            .unwrap_or_else(|| SUMMARY_UNAVAILABLE.into()),
        ModelOutput::RawText(raw) => {
            let summary = raw.trim();
            if summary.is_empty() {
                SUMMARY_UNAVAILABLE.into()
            } else {
                summary.to_string()
            }
        }
    }
}

/// A free-form answer and the sentence that supports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnswer {
    pub answer: String,
    pub justification: String,
}

/// Parse an "ask anything" completion. The justification is searched for with
/// the untrimmed completion.
pub fn parse_answer(text: &str, document: &str, prefix_chars: usize) -> ParsedAnswer {
    ParsedAnswer {
        answer: text.trim().to_string(),
        justification: find_justification(document, text, prefix_chars),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::{NO_JUSTIFICATION, SNIPPET_NOT_FOUND};

    // --- questions ---

    #[test]
    fn well_formed_array_is_parsed_in_order() {
        let text = r#"[
  {"question": "What is X?", "answer": "Y"},
  {"question": "How does A work?", "answer": "B"},
  {"question": "Why is C important?", "answer": "Because D..."}
]"#;
        let questions = parse_questions(text);
        assert_eq!(
            questions,
            vec![
                ChallengeQuestion::new("What is X?", "Y"),
                ChallengeQuestion::new("How does A work?", "B"),
                ChallengeQuestion::new("Why is C important?", "Because D..."),
            ]
        );
    }

    #[test]
    fn fenced_array_is_parsed_strictly() {
        let text = "```json\n[{\"question\": \"Q1?\", \"answer\": \"A1\"}]\n```";
        assert_eq!(parse_questions(text), vec![ChallengeQuestion::new("Q1?", "A1")]);
    }

    #[test]
    fn extra_keys_are_ignored() {
        let text = r#"[{"question": "Q?", "answer": "A", "difficulty": "easy"}]"#;
        assert_eq!(parse_questions(text), vec![ChallengeQuestion::new("Q?", "A")]);
    }

    #[test]
    fn malformed_json_is_salvaged_in_order() {
        let text = r#"Sure! Here are your questions:
{"question": "What is X?", "answer": "Y"},
{"question": "How does A work?",   "answer": "B"}
{"question": "Why is C important?", "answer": "Because D"}
Hope this helps"#;
        let questions = parse_questions(text);
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0], ChallengeQuestion::new("What is X?", "Y"));
        assert_eq!(questions[1], ChallengeQuestion::new("How does A work?", "B"));
        assert_eq!(questions[2].answer, "Because D");
    }

    #[test]
    fn truncated_array_keeps_complete_objects() {
        let text = r#"[{"question": "Q1?", "answer": "A1"}, {"question": "Q2?", "answer": "A"#;
        assert_eq!(parse_questions(text), vec![ChallengeQuestion::new("Q1?", "A1")]);
    }

    #[test]
    fn unparseable_text_yields_sentinel() {
        let questions = parse_questions("I cannot generate questions for this document.");
        assert_eq!(questions.len(), 1);
        assert!(questions[0].is_sentinel());
        assert_eq!(questions[0].question, "Unable to parse valid questions");
        assert_eq!(questions[0].answer, "N/A");
    }

    #[test]
    fn empty_array_yields_sentinel() {
        let questions = parse_questions("[]");
        assert_eq!(questions, vec![ChallengeQuestion::unparseable()]);
    }

    #[test]
    fn json_object_instead_of_array_yields_sentinel() {
        let questions = parse_questions(r#"{"questions": "none"}"#);
        assert_eq!(questions, vec![ChallengeQuestion::unparseable()]);
    }

    // --- ModelOutput ---

    #[test]
    fn object_text_is_structured() {
        let output = ModelOutput::from_completion(r#"{"feedback": "Good", "score": 3}"#);
        assert!(matches!(output, ModelOutput::Structured(_)));
        assert_eq!(output.field("feedback").as_deref(), Some("Good"));
        assert_eq!(output.field("score").as_deref(), Some("3"));
        assert_eq!(output.field("missing"), None);
    }

    #[test]
    fn non_object_json_is_raw() {
        assert!(matches!(ModelOutput::from_completion("[1, 2]"), ModelOutput::RawText(_)));
        assert!(matches!(ModelOutput::from_completion("\"quoted\""), ModelOutput::RawText(_)));
        assert_eq!(ModelOutput::from_completion("plain").field("feedback"), None);
    }

    #[test]
    fn code_fence_stripping() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{}\n```  "), "{}");
        assert_eq!(strip_code_fence("  no fence "), "no fence");
    }

    // --- evaluation ---

    #[test]
    fn structured_evaluation() {
        let text = r#"{"feedback": "Correct!", "justification": "The text says so."}"#;
        let result = parse_evaluation(text, "doc", "answer", 50);
        assert_eq!(result.feedback, "Correct!");
        assert_eq!(result.justification, "The text says so.");
    }

    #[test]
    fn structured_evaluation_missing_keys() {
        let result = parse_evaluation(r#"{"verdict": "ok"}"#, "doc", "answer", 50);
        assert_eq!(result.feedback, DEFAULT_FEEDBACK);
        assert_eq!(result.justification, DEFAULT_JUSTIFICATION);
    }

    #[test]
    fn raw_evaluation_falls_back_to_snippet() {
        let doc = "Photosynthesis converts light into chemical energy in plants.";
        let result = parse_evaluation(
            "  Mostly right, but you missed the role of light.  ",
            doc,
            "light into chemical energy",
            10,
        );
        assert_eq!(result.feedback, "Mostly right, but you missed the role of light.");
        assert_eq!(result.justification, "converts light into chemical energy in plants");
    }

    #[test]
    fn raw_evaluation_without_snippet() {
        let result = parse_evaluation("Wrong.", "Unrelated text.", "Jupiter", 50);
        assert_eq!(result.feedback, "Wrong.");
        assert_eq!(result.justification, SNIPPET_NOT_FOUND);
    }

    #[test]
    fn empty_evaluation_gets_default_feedback() {
        let result = parse_evaluation("   ", "doc", "x", 50);
        assert_eq!(result.feedback, DEFAULT_FEEDBACK);
    }

    // --- summary ---

    #[test]
    fn raw_summary_is_trimmed() {
        assert_eq!(parse_summary("\n A concise summary. \n"), "A concise summary.");
    }

    #[test]
    fn structured_summary_reads_feedback_then_summary() {
        assert_eq!(parse_summary(r#"{"feedback": "From feedback"}"#), "From feedback");
        assert_eq!(parse_summary(r#"{"summary": "From summary"}"#), "From summary");
        assert_eq!(parse_summary(r#"{"title": "Nope"}"#), SUMMARY_UNAVAILABLE);
    }

    #[test]
    fn empty_summary_is_unavailable() {
        assert_eq!(parse_summary(""), SUMMARY_UNAVAILABLE);
    }

    // --- answers ---

    #[test]
    fn answer_is_trimmed_and_justified() {
        let doc = "Paris is the capital. It is large.";
        let parsed = parse_answer("Paris is the capital of France.\n", doc, 10);
        assert_eq!(parsed.answer, "Paris is the capital of France.");
        assert_eq!(parsed.justification, "Paris is the capital.");
    }

    #[test]
    fn unjustified_answer() {
        let parsed = parse_answer("Nobody knows.", "Paris is the capital.", 10);
        assert_eq!(parsed.justification, NO_JUSTIFICATION);
    }
}
