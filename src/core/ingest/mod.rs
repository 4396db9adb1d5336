//! Document ingestion: discovery, sectioning, building, upload.
//!
//! The pipeline wires the stages together; the sectionizer is the
//! algorithmic core. Stages are pull-based and single-threaded —
//! one section is embedded and batched at a time.

pub mod builder;
pub mod pipeline;
pub mod sectionizer;
pub mod walker;

pub use builder::{filename_to_id, SectionBuilder};
pub use pipeline::IngestPipeline;
pub use sectionizer::{SectionStream, Sectionizer};
pub use walker::DocWalker;
