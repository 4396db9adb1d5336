//! PDF page text extraction via lopdf.

use std::path::Path;

use crate::core::error::{Result, TesseraError};
use crate::core::extract::PageTextProvider;
use crate::core::types::PageText;

/// Extracts per-page text from PDF documents.
///
/// Pages that fail text extraction (damaged content streams,
/// unsupported fonts) are kept as empty pages so page numbering and
/// offsets stay consistent with the physical document.
#[derive(Debug, Clone, Default)]
pub struct PdfPageProvider;

impl PdfPageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PageTextProvider for PdfPageProvider {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>> {
        let document = lopdf::Document::load(path).map_err(|e| {
            TesseraError::ExtractionFailed(format!("Failed to load PDF {path:?}: {e}"))
        })?;

        let mut pages = Vec::new();
        let mut offset = 0;

        for (page_index, (&page_number, _)) in document.get_pages().iter().enumerate() {
            let text = match document.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        "Failed to extract text from page {} of {:?}: {}",
                        page_number,
                        path,
                        e
                    );
                    String::new()
                }
            };

            let length = text.chars().count();
            pages.push(PageText {
                page_index,
                start_offset: offset,
                text,
            });
            offset += length;
        }

        tracing::debug!("Extracted {} pages from {:?}", pages.len(), path);
        Ok(pages)
    }
}
