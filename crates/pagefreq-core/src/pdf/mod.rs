//! PDF page text extraction.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Ordered sequence of (page number, raw page text) pairs.
pub type PageTexts<'a> = Box<dyn Iterator<Item = (u32, String)> + 'a>;

/// Trait for page text sources.
///
/// A source produces a finite, ordered sequence of raw page texts, one per
/// physical page, in page order starting at 1. Stage 1 of the pipeline only
/// depends on this trait, so tests and other document backends can supply
/// page text without a PDF.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Raw text of the whole document.
    fn extract_text(&self) -> Result<String>;

    /// Raw text of a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Lazy, ordered (page number, raw text) pairs, starting at page 1.
    fn pages(&self) -> Result<PageTexts<'_>>;
}
