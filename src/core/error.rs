//! Error types and error handling for the Tessera ingestion service.
//!
//! This module defines the error types used throughout the
//! application. CLI-specific presentation (exit codes, colored
//! output) is handled in the adapter modules.

use thiserror::Error;

/// Result type alias for Tessera operations
pub type Result<T> = std::result::Result<T, TesseraError>;

/// Main error type for the Tessera service
#[derive(Error, Debug)]
pub enum TesseraError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Embedding request throttled: {0}")]
    EmbeddingThrottled(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Ingestion cancelled while processing {0}")]
    Cancelled(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl TesseraError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TesseraError::DocumentNotFound(_) | TesseraError::InvalidPath(_)
        )
    }

    /// Check if the embedding layer may retry this error
    pub fn is_throttled(&self) -> bool {
        matches!(self, TesseraError::EmbeddingThrottled(_))
    }

    /// Check if this is a cancellation (graceful abort, not a failure)
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TesseraError::Cancelled(_))
    }
}
