//! Ingestion pipeline orchestration.
//!
//! Coordinates the end-to-end ingestion workflow:
//! 1. Discover documents
//! 2. Extract per-page text
//! 3. Sectionize
//! 4. Build indexed sections (ids, metadata, embeddings)
//! 5. Upload batches to the search index
//!
//! The pipeline is a single-threaded pull chain: the section stream
//! is consumed one section at a time, embedded, and flushed to the
//! uploader in batches. A cancellation token is checked between
//! section emissions so a run can be aborted gracefully.

use std::path::Path;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::embedding::Embedder;
use crate::core::error::{Result, TesseraError};
use crate::core::extract::provider_for;
use crate::core::index::IndexUploader;
use crate::core::ingest::{DocWalker, SectionBuilder, Sectionizer};
use crate::core::types::{IndexedSection, IngestStats, PageMap};

/// Orchestrates the ingestion pipeline
pub struct IngestPipeline<'a> {
    sectionizer: Sectionizer,
    embedder: &'a dyn Embedder,
    uploader: &'a dyn IndexUploader,
    category: String,
    batch_size: usize,
    max_attempts: usize,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
    max_file_size_mb: usize,
    cancel: CancellationToken,
}

impl<'a> IngestPipeline<'a> {
    /// Create a new ingestion pipeline from configuration and
    /// explicitly injected collaborators.
    pub fn new(
        config: &Config,
        embedder: &'a dyn Embedder,
        uploader: &'a dyn IndexUploader,
    ) -> Self {
        let sectionizer = Sectionizer::new(
            config.sections.max_section_length,
            config.sections.sentence_search_limit,
            config.sections.section_overlap,
        );

        Self {
            sectionizer,
            embedder,
            uploader,
            category: config.documents.category.clone(),
            batch_size: config.upload.batch_size,
            max_attempts: config.embedding.max_attempts,
            include_patterns: config.documents.include_patterns.clone(),
            exclude_patterns: config.documents.exclude_patterns.clone(),
            max_file_size_mb: config.documents.max_file_size_mb,
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a cancellation token checked between section emissions.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Ingest every matching document under a directory.
    ///
    /// Documents that fail extraction are logged and skipped.
    /// Embedding-retry exhaustion and cancellation abort the whole
    /// run: a partially embedded document would leave the remote
    /// index inconsistent.
    pub async fn ingest_directory(&self, root: &Path) -> Result<IngestStats> {
        let start = Instant::now();

        tracing::info!("Starting document discovery in {:?}", root);
        let walker = DocWalker::new(
            self.include_patterns.clone(),
            self.exclude_patterns.clone(),
            self.max_file_size_mb,
        )?;
        let documents = walker.collect_documents(root)?;
        tracing::info!("Found {} documents to ingest", documents.len());

        let mut stats = IngestStats::default();

        for path in &documents {
            match self.ingest_document(path).await {
                Ok(doc_stats) => {
                    stats.absorb(&doc_stats);
                    tracing::debug!(
                        "Ingested {:?} ({} sections)",
                        path,
                        doc_stats.sections_built
                    );
                }
                Err(e) if e.is_not_found() || matches!(e, TesseraError::ExtractionFailed(_)) => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                    stats.documents_skipped += 1;
                    // Continue processing other documents
                }
                Err(e) => return Err(e),
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Ingestion complete: {} documents indexed, {} skipped, \
             {} sections built, {} uploaded in {}ms",
            stats.documents_indexed,
            stats.documents_skipped,
            stats.sections_built,
            stats.sections_uploaded,
            stats.duration_ms
        );

        Ok(stats)
    }

    /// Ingest a single document end to end.
    pub async fn ingest_document(&self, path: &Path) -> Result<IngestStats> {
        if !path.is_file() {
            return Err(TesseraError::DocumentNotFound(format!("{path:?}")));
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TesseraError::InvalidPath(format!("{path:?}")))?
            .to_string();

        let provider = provider_for(path).ok_or_else(|| {
            TesseraError::ExtractionFailed(format!("No page text provider for {filename}"))
        })?;

        let pages = provider.extract_pages(path)?;
        let page_map = PageMap::new(pages);

        // A document with entirely empty text produces zero
        // sections; that is not an error.
        if page_map.full_text().is_empty() {
            tracing::debug!("Document {:?} has no extractable text", path);
            return Ok(IngestStats {
                documents_indexed: 1,
                ..IngestStats::default()
            });
        }

        let mut builder =
            SectionBuilder::new(&filename, &self.category, self.embedder, self.max_attempts);

        let mut stats = IngestStats {
            documents_indexed: 1,
            ..IngestStats::default()
        };
        let mut batch: Vec<IndexedSection> = Vec::with_capacity(self.batch_size);

        for section in self.sectionizer.sections(&page_map) {
            if self.cancel.is_cancelled() {
                return Err(TesseraError::Cancelled(filename));
            }

            let indexed = builder.build(section).await?;
            stats.sections_built += 1;
            batch.push(indexed);

            if batch.len() >= self.batch_size {
                stats.sections_uploaded += self.flush(&mut batch).await;
            }
        }

        if !batch.is_empty() {
            stats.sections_uploaded += self.flush(&mut batch).await;
        }

        Ok(stats)
    }

    /// Upload one batch; failures are logged, not retried.
    async fn flush(&self, batch: &mut Vec<IndexedSection>) -> usize {
        let succeeded = match self.uploader.upload_batch(batch).await {
            Ok(report) => {
                tracing::info!(
                    "Indexed {} sections, {} succeeded",
                    report.uploaded,
                    report.succeeded
                );
                report.succeeded
            }
            Err(e) => {
                tracing::warn!("Batch upload failed: {}", e);
                0
            }
        };

        batch.clear();
        succeeded
    }
}
