//! `docmentor challenge`: Answer generated questions about a document and
//! get each answer graded.

use docmentor_assistant::{Assistant, GenerateOutcome};

use super::source::SourceArgs;
use super::Input;

pub async fn run(source: SourceArgs, no_summary: bool) -> Result<(), Box<dyn std::error::Error>> {
    if source.reads_stdin() {
        return Err("Challenge mode reads answers from stdin; load the document with --file PATH or --text".into());
    }

    let mut assistant = super::open(&source).await?;
    if !no_summary {
        super::print_summary(&assistant).await;
    }

    println!("  🧩 Challenge mode");
    println!("  Type ':reset' for new questions, 'exit' or Ctrl+C to quit.");
    println!();

    generate(&mut assistant).await;

    let mut input = Input::stdin();
    loop {
        show_progress(&assistant);

        let Some(line) = input.read("  Answer > ").await? else {
            break;
        };
        match line.as_str() {
            "" => continue,
            cmd if super::is_exit(cmd) => break,
            ":reset" => {
                assistant.reset_challenge();
                generate(&mut assistant).await;
            }
            answer if assistant.current_question().is_some() => submit(&mut assistant, answer).await,
            _ => {
                println!("  No question is waiting for an answer. Type ':reset' or 'exit'.");
                println!();
            }
        }
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}

async fn generate(assistant: &mut Assistant) {
    eprint!("  Generating questions...");
    let outcome = assistant.generate_challenge().await;
    eprint!("\r                        \r");

    match outcome {
        Ok(GenerateOutcome::Ready(count)) => {
            println!("  ✅ {count} questions ready.");
            println!();
        }
        Ok(GenerateOutcome::Degraded(placeholder)) => {
            for q in &placeholder {
                println!("  ⚠️  {}", q.question);
            }
            println!("  The model's reply could not be read as questions. Type ':reset' to try again.");
            println!();
        }
        Err(e) => {
            eprintln!("  [Error] {e}");
            println!();
        }
    }
}

fn show_progress(assistant: &Assistant) {
    let challenge = assistant.challenge();
    if let Some(question) = assistant.current_question() {
        println!(
            "  Q{}/{}: {}",
            challenge.current_index() + 1,
            challenge.questions().len(),
            question.question
        );
    }
}

async fn submit(assistant: &mut Assistant, answer: &str) {
    eprint!("  Grading...");
    let result = assistant.submit_challenge_answer(answer).await;
    eprint!("\r           \r");

    match result {
        Ok(evaluation) => {
            println!();
            println!("  💬 Feedback: {}", evaluation.feedback);
            println!("  📌 Justification: {}", evaluation.justification);
            println!();
            if assistant.challenge().is_complete() {
                println!(
                    "  🎉 Challenge complete! {} questions answered. Type ':reset' for new questions or 'exit'.",
                    assistant.challenge().answered()
                );
                println!();
            }
        }
        Err(e) => {
            eprintln!("  [Error] {e}");
            println!();
        }
    }
}
