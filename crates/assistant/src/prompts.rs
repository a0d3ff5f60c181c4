//! Prompt text for each assistant operation.
//!
//! Every builder is pure: the same inputs always produce the same prompt, and
//! the full document text is embedded verbatim.

use std::fmt::Write;

use docmentor_core::memory::ChatMemory;

/// Ask for a plain-text summary of at most `word_limit` words.
pub fn build_summary_prompt(document: &str, word_limit: usize) -> String {
    format!("Summarize this document in under {word_limit} words:\n\n{document}")
}

/// Ask a question about the document, with every earlier exchange replayed
/// oldest first.
pub fn build_answer_prompt(document: &str, question: &str, memory: &ChatMemory) -> String {
    let mut history = String::new();
    for pair in memory {
        let _ = writeln!(history, "Q: {}\nA: {}", pair.question, pair.answer);
    }

    format!(
        "\nYou are an AI assistant that answers questions using only the following document:\n\n\
         --- Document ---\n{document}\n----------------\n\n\
         Use prior context if helpful.\n\n\
         {history}\n\
         Now answer:\nQ: {question}\nA:"
    )
}

/// Ask for `count` comprehension questions as a JSON array of
/// `{"question", "answer"}` objects.
pub fn build_question_generation_prompt(document: &str, count: usize) -> String {
    format!(
        "\nRead the document below and generate exactly {count} logic-based or comprehension-focused questions.\n\
         Respond in valid JSON ONLY like this:\n\n\
         [\n  \
         {{\"question\": \"What is X?\", \"answer\": \"Y\"}},\n  \
         {{\"question\": \"How does A work?\", \"answer\": \"B\"}},\n  \
         {{\"question\": \"Why is C important?\", \"answer\": \"Because D...\"}}\n\
         ]\n\n\
         Document:\n{document}\n"
    )
}

/// Ask for a grading of `user_answer` against the reference answer, as a JSON
/// object with `feedback` and `justification`.
pub fn build_evaluation_prompt(question: &str, user_answer: &str, correct_answer: &str) -> String {
    format!(
        "\nEvaluate the user's answer compared to the correct answer based on the document. \n\n\
         Return a JSON with:\n\
         - feedback: constructive response\n\
         - justification: supporting explanation (can include snippet)\n\n\
         Question: {question}\n\
         Correct Answer: {correct_answer}\n\
         User Answer: {user_answer}\n"
    )
}
