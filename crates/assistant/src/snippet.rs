//! Document excerpts that back up an answer.
//!
//! Three separate strategies with different tolerance:
//!
//! - [`extract_snippet`]: the answer appears (case aside) verbatim; return it
//!   with surrounding context. Used for reference answers in grading.
//! - [`best_matching_line`]: the answer is a paraphrase; return the most
//!   similar line if it is similar enough.
//! - [`find_justification`]: a free-form generated answer; return the first
//!   sentence containing its opening characters.

use regex::RegexBuilder;
use tracing::warn;

use crate::similarity::ratio;

pub const SNIPPET_NOT_FOUND: &str = "Snippet not found.";
pub const NO_SUPPORTING_LINE: &str = "No exact supporting snippet found.";
pub const NO_JUSTIFICATION: &str = "Could not extract justification from the document.";

pub const DEFAULT_WINDOW: usize = 50;
pub const DEFAULT_MIN_LINE_CHARS: usize = 20;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;
pub const DEFAULT_PREFIX_CHARS: usize = 10;

/// Find `answer` in `document` ignoring case (Unicode-aware) and return it
/// with up to `window` characters on each side, trimmed.
pub fn extract_snippet(document: &str, answer: &str, window: usize) -> String {
    let answer = answer.trim();
    if answer.is_empty() {
        return SNIPPET_NOT_FOUND.to_string();
    }

    let pattern = format!(".{{0,{window}}}{}.{{0,{window}}}", regex::escape(answer));
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            warn!(error = %e, "Could not build snippet pattern");
            return SNIPPET_NOT_FOUND.to_string();
        }
    };

    re.find(document)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| SNIPPET_NOT_FOUND.to_string())
}

/// The document line most similar to `answer`.
///
/// Only lines longer than `min_chars` (after trimming) compete. The first line
/// with the highest ratio wins and is returned trimmed, provided the ratio is
/// above `threshold`.
pub fn best_matching_line(document: &str, answer: &str, min_chars: usize, threshold: f64) -> String {
    let answer = answer.to_lowercase();
    let mut best_line = "";
    let mut best_ratio = 0.0;

    for line in document.split('\n') {
        let trimmed = line.trim();
        if trimmed.chars().count() <= min_chars {
            continue;
        }
        let r = ratio(&line.to_lowercase(), &answer);
        if r > best_ratio {
            best_ratio = r;
            best_line = trimmed;
        }
    }

    if best_ratio > threshold {
        best_line.to_string()
    } else {
        NO_SUPPORTING_LINE.to_string()
    }
}

/// First `.`-delimited sentence containing the first `prefix_chars`
/// characters of `answer` (case-insensitive), trimmed and re-terminated.
pub fn find_justification(document: &str, answer: &str, prefix_chars: usize) -> String {
    let needle = answer
        .chars()
        .take(prefix_chars)
        .collect::<String>()
        .to_lowercase();

    document
        .split('.')
        .find(|sentence| sentence.to_lowercase().contains(&needle))
        .map(|sentence| format!("{}.", sentence.trim()))
        .unwrap_or_else(|| NO_JUSTIFICATION.to_string())
}
