use crate::engine::TextGenerator;
use anyhow::{anyhow, Context, Result};
use tracing::debug;

pub const DEFAULT_NUM_QUESTIONS: usize = 5;
pub const CONTEXT_WORDS: usize = 500;

/// First `max_words` whitespace-separated words of `text`, joined by single spaces.
pub fn context_window(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_prompt(context: &str) -> String {
    format!("generate question: {context}")
}

/// Asks the model `count` times with the same prompt and keeps the first
/// candidate of each reply. Repeats are kept.
pub fn generate_questions<G: TextGenerator + ?Sized>(
    generator: &mut G,
    text: &str,
    count: usize,
) -> Result<Vec<String>> {
    let context = context_window(text, CONTEXT_WORDS);
    let prompt = build_prompt(&context);
    debug!(
        "context words={} prompt_chars={}",
        context.split(' ').filter(|w| !w.is_empty()).count(),
        prompt.len()
    );

    let mut questions = Vec::with_capacity(count);
    for i in 0..count {
        let results = generator
            .generate(&prompt)
            .with_context(|| format!("generating question {}", i + 1))?;
        let first = results
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("model returned no candidates for question {}", i + 1))?;
        debug!("question {} = {:?}", i + 1, first.generated_text);
        questions.push(first.generated_text);
    }
    Ok(questions)
}
