//! Section construction: identifiers, metadata and embeddings.
//!
//! Wraps each sectionizer emission into an `IndexedSection` with a
//! stable per-run identifier, typed source metadata and a content
//! vector from the injected embedder. Throttled embedding calls are
//! retried with randomized exponential backoff; running out of
//! attempts fails the document run, since a partially embedded
//! document would leave the index inconsistent.

use std::time::Duration;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use crate::core::embedding::Embedder;
use crate::core::error::Result;
use crate::core::types::{IndexedSection, Section, SectionMetadata};

/// Characters that survive unmangled in a document identifier
static NON_ID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new("[^0-9a-zA-Z_-]").unwrap());

/// Derive the deterministic document identifier from a filename.
///
/// Non-identifier characters are replaced by `_`; the uppercase hex
/// encoding of the raw filename is appended so distinct filenames
/// that sanitize identically still get distinct ids.
pub fn filename_to_id(filename: &str) -> String {
    let ascii = NON_ID_CHARS.replace_all(filename, "_");
    let hex: String = filename.bytes().map(|b| format!("{b:02X}")).collect();
    format!("file-{ascii}-{hex}")
}

/// Builds indexed sections for one document run.
///
/// Holds the per-run ordinal counter; ids are
/// `{file_id}-page-{ordinal}` in emission order (the ordinal is not
/// the page number).
pub struct SectionBuilder<'a> {
    file_id: String,
    filename: String,
    category: String,
    embedder: &'a dyn Embedder,
    max_attempts: usize,
    ordinal: usize,
}

impl<'a> SectionBuilder<'a> {
    /// Create a builder for one document.
    pub fn new(
        filename: &str,
        category: &str,
        embedder: &'a dyn Embedder,
        max_attempts: usize,
    ) -> Self {
        Self {
            file_id: filename_to_id(filename),
            filename: filename.to_string(),
            category: category.to_string(),
            embedder,
            max_attempts: max_attempts.max(1),
            ordinal: 0,
        }
    }

    /// Wrap one section: assign the next ordinal id, attach
    /// metadata, compute the embedding.
    pub async fn build(&mut self, section: Section) -> Result<IndexedSection> {
        let ordinal = self.ordinal;
        self.ordinal += 1;

        let content_vector = self.compute_embedding(&section.text).await?;

        Ok(IndexedSection {
            id: format!("{}-page-{}", self.file_id, ordinal),
            content: section.text,
            metadata: SectionMetadata {
                document: self.filename.clone(),
                page: section.page,
                category: self.category.clone(),
            },
            content_vector,
        })
    }

    /// Embed with bounded retries on throttling.
    async fn compute_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let mut attempt = 0;
        loop {
            match self.embedder.embed(text).await {
                Ok(vector) => return Ok(vector),
                Err(e) if e.is_throttled() && attempt + 1 < self.max_attempts => {
                    attempt += 1;
                    let delay = retry_backoff(attempt);
                    tracing::warn!(
                        "Embedding API throttled, sleeping {:.1}s before attempt {}/{}",
                        delay.as_secs_f64(),
                        attempt + 1,
                        self.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Randomized exponential backoff: uniform in
/// `[1, min(60, 2^attempt)]` seconds.
fn retry_backoff(attempt: usize) -> Duration {
    let exp = (1u64 << attempt.min(6)) as f64;
    let upper = exp.min(60.0).max(1.0);
    let secs = rand::thread_rng().gen_range(1.0..=upper);
    Duration::from_secs_f64(secs)
}
