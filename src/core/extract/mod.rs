//! Page text extraction.
//!
//! Turns source documents into ordered per-page text with running
//! character offsets — the contract the sectionizer consumes. Two
//! providers ship: raw PDFs (`PdfPageProvider`) and pre-analyzed
//! layout JSON with structured tables (`LayoutPageProvider`).

pub mod layout;
pub mod pdf;
pub mod tables;

use std::path::Path;

use crate::core::error::Result;
use crate::core::types::PageText;

pub use layout::LayoutPageProvider;
pub use pdf::PdfPageProvider;
pub use tables::{table_to_html, CellKind, Table, TableCell};

/// Per-page text extraction contract.
///
/// Implementations return one `PageText` per physical page, in page
/// order, with `start_offset` equal to the running sum of prior
/// pages' text lengths in characters. Empty pages are kept in the
/// sequence but contribute no offset advance.
pub trait PageTextProvider {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>>;
}

/// Select a provider for a document by file extension.
///
/// `.pdf` documents go through lopdf extraction; `.json` documents
/// are treated as pre-analyzed layout files. Anything else has no
/// provider.
pub fn provider_for(path: &Path) -> Option<Box<dyn PageTextProvider>> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some(Box::new(PdfPageProvider::new())),
        "json" => Some(Box::new(LayoutPageProvider::new())),
        _ => None,
    }
}
