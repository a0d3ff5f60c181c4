//! `docmentor summarize`: Print a short summary of a document.

use super::source::SourceArgs;

pub async fn run(source: SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let assistant = super::open(&source).await?;

    eprint!("  Summarizing...");
    let summary = assistant.summarize().await;
    eprint!("\r               \r");
    let summary = summary?;

    println!("  📝 Summary");
    println!();
    for line in summary.lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}
