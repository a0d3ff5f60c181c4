//! `docmentor ask`: Free-form questions about a document, with memory of
//! earlier answers.

use docmentor_assistant::snippet::NO_JUSTIFICATION;
use docmentor_assistant::Assistant;
use docmentor_core::memory::ChatMemory;

use super::source::SourceArgs;
use super::Input;

pub async fn run(
    source: SourceArgs,
    questions: Vec<String>,
    no_summary: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut assistant = super::open(&source).await?;
    if !no_summary {
        super::print_summary(&assistant).await;
    }

    if !questions.is_empty() {
        for question in &questions {
            println!("  You > {question}");
            answer(&mut assistant, question).await;
        }
        print_memory(assistant.memory());
        return Ok(());
    }

    if source.reads_stdin() {
        return Err("The document was read from stdin; pass questions with -q".into());
    }

    println!("  Ask anything about the document.");
    println!("  Type ':memory' to show the conversation so far, 'exit' or Ctrl+C to quit.");
    println!();

    let mut input = Input::stdin();
    while let Some(line) = input.read("  You > ").await? {
        match line.as_str() {
            "" => continue,
            cmd if super::is_exit(cmd) => break,
            ":memory" => print_memory(assistant.memory()),
            question => answer(&mut assistant, question).await,
        }
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

async fn answer(assistant: &mut Assistant, question: &str) {
    eprint!("  ...");
    let result = match assistant.ask(question).await {
        Ok(result) => result,
        Err(e) => {
            eprint!("\r     \r");
            eprintln!("  [Error] {e}");
            println!();
            return;
        }
    };
    eprint!("\r     \r");

    println!();
    for line in result.answer.lines() {
        println!("  Assistant > {line}");
    }
    println!();
    println!("  📌 Justification: {}", result.justification);
    if result.justification == NO_JUSTIFICATION {
        match assistant.supporting_line(&result.answer) {
            Ok(line) => println!("  🔎 Closest line: {line}"),
            Err(e) => eprintln!("  [Error] {e}"),
        }
    }
    println!();
}

fn print_memory(memory: &ChatMemory) {
    if memory.is_empty() {
        println!("  (no questions asked yet)");
        println!();
        return;
    }

    println!("  🧠 Conversation memory");
    for (i, pair) in memory.iter().enumerate() {
        println!();
        println!("  {}. Q: {}", i + 1, pair.question);
        for line in pair.answer.lines() {
            println!("     A: {line}");
        }
    }
    println!();
}
