// Test fixtures for integration testing

use std::path::Path;
use tempfile::TempDir;

use tessera::core::types::{PageMap, PageText};

/// Build `n` fifty-character sentence blocks: 49 repeats of `c`
/// followed by a period. Sentence endings land at offsets
/// `50k + 49`, which makes boundary expectations easy to compute.
#[allow(dead_code)]
pub fn sentence_blocks(n: usize, c: char) -> String {
    let mut text = String::new();
    for _ in 0..n {
        for _ in 0..49 {
            text.push(c);
        }
        text.push('.');
    }
    text
}

/// The canonical two-page scenario: 2500 characters total, page 1
/// starting at offset 1250, sentence endings at offsets 920 and
/// 1020 and nowhere else.
#[allow(dead_code)]
pub fn scenario_two_pages() -> PageMap {
    let mut text: Vec<char> = vec!['a'; 2500];
    text[920] = '.';
    text[1020] = '.';

    let page0: String = text[..1250].iter().collect();
    let page1: String = text[1250..].iter().collect();

    PageMap::new(vec![
        PageText {
            page_index: 0,
            start_offset: 0,
            text: page0,
        },
        PageText {
            page_index: 1,
            start_offset: 1250,
            text: page1,
        },
    ])
}

/// Documents directory fixture holding layout JSON files
#[allow(dead_code)]
pub struct DocsDir {
    pub dir: TempDir,
}

impl DocsDir {
    /// Create an empty documents directory
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write a layout document with one line per page
    #[allow(dead_code)]
    pub fn with_layout_doc(self, name: &str, pages: &[&str]) -> Self {
        let pages_json: Vec<_> = pages
            .iter()
            .map(|text| serde_json::json!({ "lines": [text] }))
            .collect();
        let doc = serde_json::json!({ "pages": pages_json });
        std::fs::write(self.dir.path().join(name), doc.to_string()).unwrap();
        self
    }

    /// Get path to the documents directory
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
