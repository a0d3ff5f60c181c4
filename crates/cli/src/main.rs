//! DocMentor CLI: the main entry point.
//!
//! Commands:
//! - `onboard`: Create the config directory and a default config
//! - `doctor`: Check config, API key and provider reachability
//! - `summarize`: Summarize a document
//! - `ask`: Ask questions about a document
//! - `challenge`: Answer generated questions and get graded

use clap::{Parser, Subcommand};

mod commands;

use commands::source::SourceArgs;

#[derive(Parser, Debug)]
#[command(
    name = "docmentor",
    about = "DocMentor — summarize, question and quiz yourself on documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Diagnose configuration and provider health
    Doctor,

    /// Print a short summary of a document
    Summarize {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Ask free-form questions about a document
    Ask {
        #[command(flatten)]
        source: SourceArgs,

        /// Ask these questions in order instead of entering interactive mode
        #[arg(short = 'q', long = "question", value_name = "QUESTION")]
        questions: Vec<String>,

        /// Skip the initial summary
        #[arg(long)]
        no_summary: bool,
    },

    /// Answer generated comprehension questions
    Challenge {
        #[command(flatten)]
        source: SourceArgs,

        /// Skip the initial summary
        #[arg(long)]
        no_summary: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Summarize { source } => commands::summarize::run(source).await?,
        Commands::Ask {
            source,
            questions,
            no_summary,
        } => commands::ask::run(source, questions, no_summary).await?,
        Commands::Challenge { source, no_summary } => {
            commands::challenge::run(source, no_summary).await?
        }
    }

    Ok(())
}
