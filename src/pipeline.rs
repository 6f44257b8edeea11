use crate::{
    engine::TextGenerator,
    extract::{self, PageSource},
    questions::{self, DEFAULT_NUM_QUESTIONS},
};
use anyhow::Result;
use std::time::Instant;
use tracing::info;

pub struct Pipeline<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> Pipeline<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn run(&mut self, source: &dyn PageSource) -> Result<Vec<String>> {
        info!("extracting pages={}", source.page_count());
        let text = extract::extract_text(source)?;
        self.run_text(&text)
    }

    /// Generates the default number of questions from already extracted text.
    pub fn run_text(&mut self, text: &str) -> Result<Vec<String>> {
        info!("extracted chars={}", text.chars().count());
        let started = Instant::now();
        let questions =
            questions::generate_questions(&mut self.generator, text, DEFAULT_NUM_QUESTIONS)?;
        info!(
            "generated questions={} elapsed={:?}",
            questions.len(),
            started.elapsed()
        );
        Ok(questions)
    }

    pub fn into_generator(self) -> G {
        self.generator
    }
}
