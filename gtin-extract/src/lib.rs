//! # gtin-extract - consolidate GTIN/EAN products from vendor CSV exports
//!
//! Reads every `.csv` file of a directory, keeps the rows that carry a
//! GTIN/EAN and writes them to a single three-column CSV.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV files  │────▶│   Parser    │────▶│   Schema +  │────▶│  Aggregate  │
//! │ (directory) │     │ (tokenizer) │     │  Extractor  │     │  (CSV out)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gtin_extract::{run, Config};
//!
//! let report = run(&Config::default()).unwrap();
//! println!("Extracted {} products", report.total_records);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Paths and encoding
//! - [`logs`] - Console narration
//! - [`models`] - ProductRecord, ColumnIndexSet
//! - [`parser`] - Quote-aware CSV tokenizer and decoding
//! - [`schema`] - Required columns and header resolution
//! - [`transform`] - Row extraction, aggregation, pipeline

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;
pub mod schema;

// Extraction
pub mod transform;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::Config;

pub use error::{ConfigError, CsvError, PipelineError};

pub use models::{ColumnIndexSet, ProductRecord};

pub use parser::{decode_content, detect_encoding, parse_csv, read_csv_file, Row, TextEncoding};

pub use schema::{ColumnSchema, Resolution};

pub use transform::{
    collect,
    extract_file_content,
    extract_row,
    extract_rows,
    list_csv_files,
    process_file,
    run,
    serialize,
    Aggregate,
    Extraction,
    ExtractionStats,
    FileExtraction,
    FileOutcome,
    FileReport,
    RunReport,
};
