//! Extraction module.
//!
//! - Extractor: row filter and per-file extraction
//! - Aggregate: cross-file collection and CSV output
//! - Pipeline: directory scan and run report

pub mod aggregate;
pub mod extractor;
pub mod pipeline;

pub use aggregate::*;
pub use extractor::*;
pub use pipeline::*;
