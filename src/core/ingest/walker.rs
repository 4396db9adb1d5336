//! Document discovery with pattern-based filtering.
//!
//! Traverses a documents directory and filters files using glob
//! patterns. Handles errors gracefully (permission denied, etc.)
//! without crashing.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{Result, TesseraError};

/// Document walker with pattern-based filtering
pub struct DocWalker {
    /// Patterns to include (e.g., "*.pdf")
    include_patterns: Vec<Pattern>,

    /// Patterns to exclude (e.g., "**/drafts/**")
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl DocWalker {
    /// Create a new document walker
    pub fn new(
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
        max_file_size_mb: usize,
    ) -> Result<Self> {
        // Parse include patterns
        let include = include_patterns
            .into_iter()
            .map(|p| {
                Pattern::new(&p).map_err(|e| {
                    TesseraError::ConfigError(format!("Invalid include pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // Parse exclude patterns
        let exclude = exclude_patterns
            .into_iter()
            .map(|p| {
                Pattern::new(&p).map_err(|e| {
                    TesseraError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            include_patterns: include,
            exclude_patterns: exclude,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Collect all matching documents from a directory
    ///
    /// Traverses the directory tree, applies include/exclude
    /// patterns and filters by file size. Results are sorted for a
    /// stable ingestion order.
    pub fn collect_documents(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut documents = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();

                    // Check file size
                    if let Ok(metadata) = entry.metadata() {
                        if metadata.len() > self.max_file_size_bytes {
                            tracing::debug!(
                                "Skipping large document: {:?} \
                                 ({} bytes)",
                                path,
                                metadata.len()
                            );
                            continue;
                        }
                    }

                    // Check patterns
                    if self.matches_patterns(path) {
                        documents.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    // Continue walking despite errors
                }
            }
        }

        documents.sort();
        Ok(documents)
    }

    /// Determine if a directory entry should be processed
    ///
    /// Filters out hidden directories and excluded patterns.
    /// Never filters the root directory itself.
    fn should_process_entry(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();

        // Never filter the root directory
        if path == root {
            return true;
        }

        // Skip hidden directories (starting with '.')
        // but only if they're not the root
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') && entry.file_type().is_dir() {
                return false;
            }
        }

        // Check exclude patterns for directories
        // (skip entire directory trees early)
        if entry.file_type().is_dir() {
            for pattern in &self.exclude_patterns {
                if pattern.matches_path(path) {
                    tracing::debug!("Skipping excluded directory: {:?}", path);
                    return false;
                }
            }
        }

        true
    }

    /// Check if a document path matches the include/exclude patterns
    fn matches_patterns(&self, path: &Path) -> bool {
        // Convert path to string for matching
        let path_str = match path.to_str() {
            Some(s) => s,
            None => return false,
        };

        // If no include patterns, include all
        let matches_include = self.include_patterns.is_empty()
            || self.include_patterns.iter().any(|p| {
                // Match against both full path and filename
                p.matches(path_str)
                    || path
                        .file_name()
                        .and_then(|f| f.to_str())
                        .map(|f| p.matches(f))
                        .unwrap_or(false)
            });

        if !matches_include {
            return false;
        }

        // Must not match any exclude pattern
        !self
            .exclude_patterns
            .iter()
            .any(|p| p.matches(path_str) || p.matches_path(path))
    }
}
