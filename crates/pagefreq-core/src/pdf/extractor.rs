//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PageSource, PageTexts, Result};
use crate::error::ExtractionError;

/// PDF page text source using lopdf for document structure and pdf-extract
/// for the text layer.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new extractor with no document loaded.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc =
            Document::load_mem(data).map_err(|e| ExtractionError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(ExtractionError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            // Save the decrypted document so pdf_extract sees plaintext
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data).map_err(|e| {
                ExtractionError::Parse(format!("failed to save decrypted PDF: {e}"))
            })?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(ExtractionError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    // The text layer comes back flattened with no page boundaries, so lines
    // are apportioned evenly across pages; the last page takes the remainder.
    fn page_chunks(&self) -> Result<Vec<String>> {
        let full_text = self.extract_text()?;
        let page_count = self.page_count() as usize;
        if page_count == 0 {
            return Err(ExtractionError::NoPages);
        }

        let lines: Vec<&str> = full_text.lines().collect();
        let lines_per_page = lines.len() / page_count;

        let chunks = (0..page_count)
            .map(|i| {
                let start = i * lines_per_page;
                let end = if i + 1 == page_count {
                    lines.len()
                } else {
                    (i + 1) * lines_per_page
                };
                lines[start.min(lines.len())..end.min(lines.len())].join("\n")
            })
            .collect();

        Ok(chunks)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for PdfExtractor {
    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(ExtractionError::Parse("no document loaded".to_string()));
        }
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| ExtractionError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(ExtractionError::InvalidPage(page));
        }
        let mut chunks = self.page_chunks()?;
        Ok(chunks.swap_remove((page - 1) as usize))
    }

    fn pages(&self) -> Result<PageTexts<'_>> {
        let chunks = self.page_chunks()?;
        debug!("extracted text for {} pages", chunks.len());
        Ok(Box::new(
            chunks
                .into_iter()
                .enumerate()
                .map(|(i, text)| (i as u32 + 1, text)),
        ))
    }
}
