//! Error types for the GTIN extraction pipeline.
//!
//! - [`CsvError`] - reading and writing CSV text
//! - [`ConfigError`] - invalid configuration values
//! - [`PipelineError`] - run-level failures
//!
//! Row-level problems (short rows, empty GTIN) are not errors: they are
//! counted and skipped. File-level problems never leave the pipeline either;
//! they are folded into a [`crate::transform::FileOutcome`].

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading or serializing CSV text.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to write CSV output.
    #[error("Failed to write CSV: {0}")]
    Write(#[from] csv::Error),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building a [`crate::config::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown encoding mode.
    #[error("Unknown encoding '{0}' (expected 'utf8' or 'auto')")]
    UnknownEncoding(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The configured input directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    InputDirNotFound(PathBuf),

    /// Listing the input directory or writing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Run report could not be encoded.
    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
