//! Reading documents from disk.
//!
//! `.pdf` files go through `pdf-extract`; everything else is read as UTF-8
//! text. Image-only PDFs extract to nothing and are rejected as empty.

use std::path::Path;

use docmentor_core::document::Document;
use docmentor_core::error::DocumentError;
use tracing::{debug, info};

/// Load the document at `path`.
pub fn load_path(path: &Path) -> Result<Document, DocumentError> {
    let text = if is_pdf(path) {
        extract_pdf(path)?
    } else {
        std::fs::read_to_string(path).map_err(|e| DocumentError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
    };

    let document = Document::from_file_text(path, text)?;
    info!(
        path = %path.display(),
        chars = document.char_len(),
        "Loaded document"
    );
    Ok(document)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn extract_pdf(path: &Path) -> Result<String, DocumentError> {
    let bytes = std::fs::read(path).map_err(|e| DocumentError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "Extracting PDF text");
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| DocumentError::Extraction {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
