//! Pre-analyzed layout document ingestion.
//!
//! A layout document is the JSON output of an upstream document
//! analysis step: per-page text lines plus structured tables. Tables
//! are rendered into the page text as `<table>` HTML so the
//! sectionizer can keep them intact across section boundaries.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{Result, TesseraError};
use crate::core::extract::tables::{table_to_html, Table};
use crate::core::extract::PageTextProvider;
use crate::core::types::PageText;

/// A pre-analyzed document: ordered pages of lines and tables
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutDocument {
    pub pages: Vec<LayoutPage>,
}

/// One analyzed page
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutPage {
    /// Text lines in reading order
    #[serde(default)]
    pub lines: Vec<String>,

    /// Tables detected on the page
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl LayoutPage {
    /// Flatten the page into text: lines joined by newlines, tables
    /// appended as HTML.
    fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        for table in &self.tables {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&table_to_html(table));
        }
        text
    }
}

/// Reads layout JSON documents produced by upstream analysis.
#[derive(Debug, Clone, Default)]
pub struct LayoutPageProvider;

impl LayoutPageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PageTextProvider for LayoutPageProvider {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TesseraError::ExtractionFailed(format!("Failed to read layout {path:?}: {e}"))
        })?;

        let document: LayoutDocument = serde_json::from_str(&contents).map_err(|e| {
            TesseraError::ExtractionFailed(format!("Invalid layout document {path:?}: {e}"))
        })?;

        let mut pages = Vec::new();
        let mut offset = 0;

        for (page_index, page) in document.pages.iter().enumerate() {
            let text = page.to_text();
            let length = text.chars().count();
            pages.push(PageText {
                page_index,
                start_offset: offset,
                text,
            });
            offset += length;
        }

        tracing::debug!("Loaded {} layout pages from {:?}", pages.len(), path);
        Ok(pages)
    }
}
