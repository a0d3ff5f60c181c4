//! Subcommand implementations and the pieces they share.

pub mod ask;
pub mod challenge;
pub mod doctor;
pub mod onboard;
pub mod source;
pub mod summarize;

use std::io::Write;

use docmentor_assistant::{Assistant, AssistantSettings, CompletionClient};
use docmentor_config::{AppConfig, ConfigError};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, warn};

use source::SourceArgs;

/// Words that end an interactive loop.
const EXIT_WORDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

pub(crate) fn is_exit(input: &str) -> bool {
    EXIT_WORDS.contains(&input)
}

/// Load config and build an assistant over the default provider.
pub(crate) fn connect() -> Result<Assistant, Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider = match docmentor_providers::router::default_from_config(&config) {
        Ok(provider) => provider,
        Err(ConfigError::MissingApiKey { provider }) => {
            print_missing_key_help(&provider);
            return Err("No API key found. See above for setup instructions.".into());
        }
        Err(e) => return Err(e.into()),
    };

    debug!(provider = %config.default_provider, model = %config.model(), "Connecting");
    let client = CompletionClient::from_config(provider, &config);
    Ok(Assistant::new(client, AssistantSettings::from(&config.assistant)))
}

fn print_missing_key_help(provider: &str) {
    eprintln!();
    eprintln!("  ERROR: No API key configured for '{provider}'!");
    eprintln!();
    eprintln!("  Set one of these environment variables (or put it in a .env file):");
    eprintln!("    GEMINI_API_KEY=...      (default provider)");
    eprintln!("    OPENAI_API_KEY=sk-...   (with DOCMENTOR_PROVIDER=openai)");
    eprintln!("    DOCMENTOR_API_KEY=...   (generic)");
    eprintln!();
    eprintln!("  Or add it to your config file:");
    eprintln!("    {}", AppConfig::config_path().display());
    eprintln!();
    eprintln!("  Get a Gemini key at: https://aistudio.google.com/apikey");
    eprintln!();
}

/// Connect, load the document from `source` and show what was loaded.
pub(crate) async fn open(source: &SourceArgs) -> Result<Assistant, Box<dyn std::error::Error>> {
    let mut assistant = connect()?;
    let document = source.load().await?;

    println!();
    println!("  📄 Loaded {} ({} characters)", source.label(), document.char_len());
    println!();
    for line in document.preview().lines() {
        println!("  │ {line}");
    }
    println!();

    assistant.load_document(document);
    Ok(assistant)
}

/// Print the document summary; a failure is reported and otherwise ignored.
pub(crate) async fn print_summary(assistant: &Assistant) {
    eprint!("  Summarizing...");
    match assistant.summarize().await {
        Ok(summary) => {
            eprint!("\r               \r");
            println!("  📝 Summary");
            println!();
            for line in summary.lines() {
                println!("  {line}");
            }
            println!();
        }
        Err(e) => {
            eprint!("\r               \r");
            warn!(error = %e, "Summary failed");
            eprintln!("  [Error] {e}");
            println!();
        }
    }
}

/// Line-by-line reader for interactive loops.
pub(crate) struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    pub(crate) fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Show `prompt` and read the next line, trimmed. `None` at end of input.
    pub(crate) async fn read(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }
}
