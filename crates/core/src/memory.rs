//! Conversational memory for "ask anything" mode.
//!
//! An ordered, append-only list of question/answer pairs. Insertion order is
//! the order the pairs are replayed into the next prompt. There is no eviction;
//! the memory lives until the session's document is replaced.

use serde::{Deserialize, Serialize};

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatMemory {
    entries: Vec<QaPair>,
}

impl ChatMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair at the end of the history.
    pub fn push(&mut self, pair: QaPair) {
        self.entries.push(pair);
    }

    pub fn entries(&self) -> &[QaPair] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QaPair> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChatMemory {
    type Item = &'a QaPair;
    type IntoIter = std::slice::Iter<'a, QaPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_memory_is_empty() {
        let memory = ChatMemory::new();
        assert!(memory.is_empty());
        assert_eq!(memory.len(), 0);
    }

    #[test]
    fn push_preserves_insertion_order() {
        let mut memory = ChatMemory::new();
        memory.push(QaPair::new("Q1", "A1"));
        memory.push(QaPair::new("Q2", "A2"));

        let questions: Vec<&str> = memory.iter().map(|p| p.question.as_str()).collect();
        assert_eq!(questions, vec!["Q1", "Q2"]);
        assert_eq!(memory.entries()[1].answer, "A2");
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut memory = ChatMemory::new();
        memory.push(QaPair::new("What?", "That."));
        let json = serde_json::to_string(&memory).unwrap();
        assert_eq!(json, r#"[{"question":"What?","answer":"That."}]"#);
    }
}
