//! Row filtering and per-file extraction.
//!
//! A row becomes a [`ProductRecord`] only if it is long enough to hold all
//! three required columns and its GTIN cell is non-empty after trimming.
//! Everything else is skipped silently and only shows up in the counters.

use serde::Serialize;

use crate::models::{ColumnIndexSet, ProductRecord};
use crate::parser::{parse_csv, Row};
use crate::schema::{ColumnSchema, Resolution};

/// Counters for one file's data rows (header excluded).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    /// Rows after the header.
    pub data_rows: usize,
    /// Rows that produced a record.
    pub matched: usize,
    /// Rows with too few cells for the required columns.
    pub short_rows: usize,
    /// Rows whose GTIN cell was blank.
    pub empty_gtin_rows: usize,
}

/// Records extracted from one file, with counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<ProductRecord>,
    pub stats: ExtractionStats,
}

/// What happened to a single input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FileOutcome {
    /// Header resolved and data rows scanned.
    Extracted(ExtractionStats),
    /// The file parsed to zero rows.
    Empty,
    /// Header lacks required columns; nothing extracted.
    #[serde(rename_all = "camelCase")]
    Skipped { missing_columns: Vec<String> },
    /// The file could not be read.
    Failed { message: String },
}

/// Outcome of one file plus the records it contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileExtraction {
    pub outcome: FileOutcome,
    pub records: Vec<ProductRecord>,
}

impl FileExtraction {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            outcome: FileOutcome::Failed { message: message.into() },
            records: Vec::new(),
        }
    }
}

/// Whitespace as ECMAScript `String.prototype.trim` sees it: Unicode
/// `White_Space` minus U+0085, plus the U+FEFF byte order mark.
fn is_trim_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Turn one data row into a record, or `None` if it does not qualify.
pub fn extract_row(row: &[String], columns: &ColumnIndexSet) -> Option<ProductRecord> {
    if row.len() <= columns.max_index() {
        return None;
    }

    let gtin = row[columns.gtin].trim_matches(is_trim_whitespace);
    if gtin.is_empty() {
        return None;
    }

    Some(ProductRecord::new(
        row[columns.sku].as_str(),
        row[columns.description].as_str(),
        gtin,
    ))
}

/// Extract every qualifying data row, keeping row order.
pub fn extract_rows(rows: &[Row], columns: &ColumnIndexSet) -> Extraction {
    let mut extraction = Extraction::default();

    for row in rows {
        extraction.stats.data_rows += 1;

        if row.len() <= columns.max_index() {
            extraction.stats.short_rows += 1;
            continue;
        }

        match extract_row(row, columns) {
            Some(record) => {
                extraction.stats.matched += 1;
                extraction.records.push(record);
            }
            None => extraction.stats.empty_gtin_rows += 1,
        }
    }

    extraction
}

/// Parse one file's text, resolve its header and extract its records.
pub fn extract_file_content(content: &str, schema: &ColumnSchema) -> FileExtraction {
    let rows = parse_csv(content);

    let Some((header, data)) = rows.split_first() else {
        return FileExtraction {
            outcome: FileOutcome::Empty,
            records: Vec::new(),
        };
    };

    match schema.resolve(header) {
        Resolution::Found(columns) => {
            let extraction = extract_rows(data, &columns);
            FileExtraction {
                outcome: FileOutcome::Extracted(extraction.stats),
                records: extraction.records,
            }
        }
        Resolution::Missing(missing_columns) => FileExtraction {
            outcome: FileOutcome::Skipped { missing_columns },
            records: Vec::new(),
        },
    }
}
