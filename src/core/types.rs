//! Core data types for the Tessera ingestion service.
//!
//! This module defines the data structures flowing through the
//! pipeline: extracted pages, sections, indexed sections, upload
//! reports and run statistics.
//!
//! All offsets are **character** positions (Unicode scalar values),
//! not byte positions. Pages, sections and the page lookup share one
//! 0-based offset space over the concatenated document text.

use serde::{Deserialize, Serialize};

/// Text extracted from a single physical page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// 0-based physical page number
    pub page_index: usize,

    /// Character offset of this page's text in the concatenated
    /// document text (running sum of prior pages' lengths)
    pub start_offset: usize,

    /// The extracted page text (may be empty)
    pub text: String,
}

/// Concatenated document text plus the page-offset table
///
/// Built once per document from the extractor output; consumed by
/// the sectionizer. Offsets are strictly increasing except across
/// empty pages, which contribute no offset advance.
#[derive(Debug, Clone)]
pub struct PageMap {
    pages: Vec<PageText>,
    full_text: String,
}

impl PageMap {
    /// Assemble the page map from extractor output.
    ///
    /// Page order is taken as given; `start_offset` values are
    /// trusted to be the running sum of prior page lengths.
    pub fn new(pages: Vec<PageText>) -> Self {
        let full_text = pages.iter().map(|p| p.text.as_str()).collect();
        Self { pages, full_text }
    }

    /// The concatenated text of all pages
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// The ordered page records
    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }

    /// Map a character offset to its containing page index.
    ///
    /// Returns the page whose `[start_offset, next_start)` range
    /// contains `offset`. Offsets at or beyond the last page's start
    /// map to the last page; an empty map yields page 0.
    pub fn page_of(&self, offset: usize) -> usize {
        let num_pages = self.pages.len();
        if num_pages == 0 {
            return 0;
        }
        for i in 0..num_pages - 1 {
            if offset >= self.pages[i].start_offset && offset < self.pages[i + 1].start_offset {
                return i;
            }
        }
        num_pages - 1
    }
}

/// A contiguous span of document text chosen for independent
/// retrieval and embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// The section text (non-empty)
    pub text: String,

    /// Character offset where the section starts in the document
    pub start_offset: usize,

    /// Character offset where the section ends (exclusive)
    pub end_offset: usize,

    /// Page containing `start_offset`
    pub page: usize,
}

/// Source metadata attached to every indexed section
///
/// Carried as a typed record through the pipeline; serialized to a
/// JSON string only at the upload wire boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMetadata {
    /// Source document filename
    pub document: String,

    /// Page the section starts on
    pub page: usize,

    /// Document category (collection/topic label)
    pub category: String,
}

/// A section ready for upload to the search index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedSection {
    /// Deterministic identifier: `{file_id}-page-{ordinal}` where
    /// ordinal is the 0-based emission order, not the page number
    pub id: String,

    /// Section text content
    pub content: String,

    /// Source metadata
    pub metadata: SectionMetadata,

    /// Embedding vector (length fixed by the embedding model)
    pub content_vector: Vec<f32>,
}

/// Outcome of uploading one batch to the search index
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of sections submitted in the batch
    pub uploaded: usize,

    /// Number the index acknowledged as successful
    pub succeeded: usize,
}

/// Statistics from an ingestion run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Documents fully processed
    pub documents_indexed: usize,

    /// Documents skipped due to extraction failures
    pub documents_skipped: usize,

    /// Sections built (sectionized and embedded)
    pub sections_built: usize,

    /// Sections acknowledged by the index
    pub sections_uploaded: usize,

    /// Run duration in milliseconds
    pub duration_ms: u64,
}

impl IngestStats {
    /// Fold a per-document result into the run totals
    pub fn absorb(&mut self, other: &IngestStats) {
        self.documents_indexed += other.documents_indexed;
        self.documents_skipped += other.documents_skipped;
        self.sections_built += other.sections_built;
        self.sections_uploaded += other.sections_uploaded;
    }
}
