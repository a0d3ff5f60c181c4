//! The document a session works against.
//!
//! A [`Document`] is immutable once created. Loading a different document
//! means building a new one and handing it to the session, which discards
//! everything derived from the old text.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::DocumentError;

/// Number of characters shown by [`Document::preview`].
pub const PREVIEW_CHARS: usize = 600;

/// Where the document text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentSource {
    /// Text extracted from an uploaded file
    File { path: PathBuf },
    /// Text pasted or typed directly
    Pasted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    source: DocumentSource,
}

impl Document {
    /// Build a document from pasted text. Surrounding whitespace is trimmed.
    pub fn pasted(text: &str) -> Result<Self, DocumentError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(Self {
            text: trimmed.to_string(),
            source: DocumentSource::Pasted,
        })
    }

    /// Build a document from text already extracted from `path`.
    ///
    /// The text is kept as extracted; only a whitespace-only result is rejected.
    pub fn from_file_text(path: &Path, text: String) -> Result<Self, DocumentError> {
        if text.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(Self {
            text,
            source: DocumentSource::File {
                path: path.to_path_buf(),
            },
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// Character count (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The first [`PREVIEW_CHARS`] characters, with "..." appended when cut.
    pub fn preview(&self) -> String {
        let mut preview: String = self.text.chars().take(PREVIEW_CHARS).collect();
        if self.text.chars().nth(PREVIEW_CHARS).is_some() {
            preview.push_str("...");
        }
        preview
    }
}
