use anyhow::{Context, Result};
use lopdf::Document;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Anything that can hand out per-page text in page order.
pub trait PageSource {
    fn page_count(&self) -> usize;
    /// Text of the page at `index` (0-based). Pages with no text return an empty string.
    fn page_text(&self, index: usize) -> Result<String>;
}

/// Concatenates every page's text in order, each followed by a newline.
pub fn extract_text<S: PageSource + ?Sized>(source: &S) -> Result<String> {
    let mut text = String::new();
    for i in 0..source.page_count() {
        let page = source
            .page_text(i)
            .with_context(|| format!("extracting text from page {}", i + 1))?;
        text.push_str(&page);
        text.push('\n');
    }
    Ok(text)
}

pub fn extract_text_from_pdf(path: &Path) -> Result<String> {
    let pages = PdfPages::open(path)?;
    debug!("pdf {} pages={}", path.display(), pages.page_count());
    extract_text(&pages).with_context(|| format!("extracting text: {}", path.display()))
}

/// A parsed PDF document backed by lopdf.
pub struct PdfPages {
    doc: Document,
    page_numbers: Vec<u32>,
}

impl PdfPages {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening pdf: {}", path.display()))?;
        let doc = Document::load_from(file)
            .with_context(|| format!("parsing pdf: {}", path.display()))?;
        Ok(Self::from_document(doc))
    }

    pub fn from_document(doc: Document) -> Self {
        // get_pages is keyed by 1-based page number, so this is already in page order.
        let page_numbers = doc.get_pages().keys().copied().collect();
        Self { doc, page_numbers }
    }
}

impl PageSource for PdfPages {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let number = self
            .page_numbers
            .get(index)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("page index out of range: {index}"))?;
        let mut text = self.doc.extract_text(&[number])?;
        // lopdf ends every text object with a newline; extract_text adds the page's own.
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }
}
