//! Tessera - PDF Ingestion Pipeline for Retrieval
//!
//! Ingests PDF documents, splits them into overlapping
//! sentence-aware sections, embeds each section and uploads the
//! result to a remote vector search index.
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg
//!   - extract (per-page text: PDF via lopdf, analyzed layout JSON)
//!   - ingest (discovery, sectionizer, section builder, pipeline)
//!   - embedding (OpenAI-compatible embeddings client)
//!   - index (search index batch upload client)
//!   - services (unified service container)
//!
//! - **cli**: clap adapter (depends on core)
//!
//! # Key Features
//!
//! - UTF-8 safe sectioning (character-based, never panics)
//! - Sentence-boundary aware windows with configurable overlap
//! - HTML tables kept intact across section boundaries
//! - Deterministic section ids for idempotent re-indexing
//! - Throttle-aware embedding with randomized exponential backoff
//! - Batched index upload with per-batch success reporting

// Core domain logic (protocol-agnostic)
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{Result, TesseraError};
pub use crate::core::services::Services;
pub use crate::core::types::*;
