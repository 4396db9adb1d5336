//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of the CLI adapter.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **extract**: Per-page text extraction (PDF, layout JSON)
//! - **ingest**: Discovery, sectioning, building, upload pipeline
//! - **embedding**: Embedding client
//! - **index**: Search index upload client
//! - **services**: Unified service container

pub mod config;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod index;
pub mod ingest;
pub mod services;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{Result, TesseraError};
pub use services::Services;
