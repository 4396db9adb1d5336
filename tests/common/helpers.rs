// Test helper functions and collaborator doubles

use std::sync::Mutex;

use async_trait::async_trait;

use tessera::core::embedding::Embedder;
use tessera::core::error::Result;
use tessera::core::index::IndexUploader;
use tessera::core::types::{BatchReport, IndexedSection, PageMap, PageText, Section};

/// Build a page map from page texts, computing running character
/// offsets the way an extractor would.
#[allow(dead_code)]
pub fn page_map_from(pages: &[&str]) -> PageMap {
    let mut records = Vec::new();
    let mut offset = 0;
    for (page_index, text) in pages.iter().enumerate() {
        records.push(PageText {
            page_index,
            start_offset: offset,
            text: text.to_string(),
        });
        offset += text.chars().count();
    }
    PageMap::new(records)
}

/// Assert consecutive sections leave no gap and the whole document
/// (up to a tail shorter than `overlap`) is covered.
#[allow(dead_code)]
pub fn assert_gap_free(sections: &[Section], total_chars: usize, overlap: usize) {
    assert!(!sections.is_empty(), "expected at least one section");
    assert_eq!(sections[0].start_offset, 0, "coverage must start at 0");

    for pair in sections.windows(2) {
        assert!(
            pair[1].start_offset <= pair[0].end_offset,
            "gap between sections: [{}, {}) then [{}, {})",
            pair[0].start_offset,
            pair[0].end_offset,
            pair[1].start_offset,
            pair[1].end_offset
        );
    }

    let covered_to = sections.last().unwrap().end_offset;
    assert!(
        covered_to + overlap >= total_chars,
        "uncovered tail wider than the overlap: covered to {covered_to} of {total_chars}"
    );
}

/// Embedder double returning a fixed vector
#[allow(dead_code)]
pub struct StaticEmbedder {
    pub vector: Vec<f32>,
}

impl StaticEmbedder {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            vector: vec![0.5, -0.5, 0.25],
        }
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(self.vector.clone())
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

/// Uploader double recording every uploaded section
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingUploader {
    pub sections: Mutex<Vec<IndexedSection>>,
}

impl RecordingUploader {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploaded (id, content) pairs in upload order
    #[allow(dead_code)]
    pub fn uploaded(&self) -> Vec<(String, String)> {
        self.sections
            .lock()
            .unwrap()
            .iter()
            .map(|s| (s.id.clone(), s.content.clone()))
            .collect()
    }
}

#[async_trait]
impl IndexUploader for RecordingUploader {
    async fn upload_batch(&self, sections: &[IndexedSection]) -> Result<BatchReport> {
        self.sections.lock().unwrap().extend_from_slice(sections);
        Ok(BatchReport {
            uploaded: sections.len(),
            succeeded: sections.len(),
        })
    }
}
