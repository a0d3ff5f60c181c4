//! Where a command's document comes from.

use std::path::PathBuf;

use clap::Args;
use docmentor_assistant::loader;
use docmentor_core::document::Document;
use docmentor_core::error::DocumentError;
use tokio::io::AsyncReadExt;

/// Exactly one of `--file` or `--text`.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Document to load (.pdf, .txt, .md, ...); `-` reads text from stdin
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Document text given directly
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,
}

impl SourceArgs {
    /// Whether the document is read from stdin, which then can't take input.
    pub fn reads_stdin(&self) -> bool {
        self.file.as_deref().is_some_and(|p| p.as_os_str() == "-")
    }

    pub async fn load(&self) -> Result<Document, DocumentError> {
        if let Some(text) = &self.text {
            return Document::pasted(text);
        }

        match &self.file {
            Some(path) if self.reads_stdin() => {
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .map_err(|e| DocumentError::Read {
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                Document::pasted(&text)
            }
            Some(path) => loader::load_path(path),
            None => Err(DocumentError::Empty),
        }
    }

    /// How to refer to the document in output.
    pub fn label(&self) -> String {
        match &self.file {
            Some(_) if self.reads_stdin() => "stdin".into(),
            Some(path) => path.display().to_string(),
            None => "pasted text".into(),
        }
    }
}
