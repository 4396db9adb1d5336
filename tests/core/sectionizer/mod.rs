//! Sectionizer layer tests
//!
//! Boundary-search, coverage and table-continuity properties of the
//! section stream.

mod test_boundaries;
mod test_coverage;
mod test_tables;
