pub mod python;
pub mod types;

use anyhow::Result;

pub use types::{Generation, WorkerReply};

/// A text-generation model: one prompt in, one or more candidates out.
pub trait TextGenerator {
    fn generate(&mut self, prompt: &str) -> Result<Vec<Generation>>;
}

impl<G: TextGenerator + ?Sized> TextGenerator for Box<G> {
    fn generate(&mut self, prompt: &str) -> Result<Vec<Generation>> {
        (**self).generate(prompt)
    }
}
