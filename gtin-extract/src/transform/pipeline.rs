//! End-to-end extraction run.
//!
//! Lists the CSV files of the input directory, folds each one into an
//! [`Aggregate`], then writes the consolidated CSV. A file that cannot be read
//! or lacks a required column is reported and skipped; only a missing input
//! directory or a failed output write stops the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use gtin_extract::{run, Config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run(&Config::from_env()?)?;
//!     println!("{} products from {} files", report.total_records, report.files_found);
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::aggregate::{write_output, Aggregate};
use super::extractor::{extract_file_content, FileExtraction, FileOutcome};
use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{
    log_error, log_error_indent, log_info, log_info_indent, log_success, log_warning_indent,
};
use crate::parser::{read_csv_file, TextEncoding};
use crate::schema::ColumnSchema;

/// Outcome of one file within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// File name (no directory).
    pub file: String,
    pub outcome: FileOutcome,
}

/// Summary of a whole run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub encoding: TextEncoding,
    pub files_found: usize,
    pub files: Vec<FileReport>,
    pub total_records: usize,
    pub started_at: String,
    pub finished_at: String,
}

impl RunReport {
    /// Files whose header resolved.
    pub fn extracted_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Extracted(_)))
    }

    /// Files skipped for missing columns.
    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    /// Files that could not be read.
    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    pub fn to_json(&self) -> PipelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Whether a file name has a `.csv` extension, ignoring case.
pub fn is_csv_file_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".csv")
}

/// List `.csv` entries of `dir`, sorted by file name.
pub fn list_csv_files(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PipelineError::InputDirNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if is_csv_file_name(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read, parse and extract one file, narrating the result.
pub fn process_file(path: &Path, schema: &ColumnSchema, encoding: TextEncoding) -> FileExtraction {
    let name = display_name(path);
    log_info(format!("Reading file: {}", name));

    let extraction = match read_csv_file(path, encoding) {
        Ok(content) => extract_file_content(&content, schema),
        Err(e) => FileExtraction::failed(e.to_string()),
    };

    match &extraction.outcome {
        FileOutcome::Extracted(stats) => {
            log_info_indent(format!("-> {} products with GTIN found.", stats.matched), 1);
        }
        FileOutcome::Empty => {}
        FileOutcome::Skipped { missing_columns } => log_warning_indent(
            format!(
                "File {} skipped: required columns not found ({}).",
                name,
                missing_columns.join(", ")
            ),
            1,
        ),
        FileOutcome::Failed { message } => {
            log_error_indent(format!("Failed to process {}: {}", name, message), 1);
        }
    }

    extraction
}

/// Fold `files` into one aggregate, in order, with a report entry per file.
pub fn collect(
    files: &[PathBuf],
    schema: &ColumnSchema,
    encoding: TextEncoding,
) -> (Aggregate, Vec<FileReport>) {
    files.iter().fold(
        (Aggregate::new(), Vec::with_capacity(files.len())),
        |(mut aggregate, mut reports), path| {
            let FileExtraction { outcome, records } = process_file(path, schema, encoding);
            aggregate.extend(records);
            reports.push(FileReport {
                file: display_name(path),
                outcome,
            });
            (aggregate, reports)
        },
    )
}

/// Run the whole extraction described by `config`.
pub fn run(config: &Config) -> PipelineResult<RunReport> {
    let started_at = chrono::Utc::now().to_rfc3339();
    log_info("Starting GTIN extraction...");

    let files = match list_csv_files(&config.input_dir) {
        Ok(files) => files,
        Err(e) => {
            log_error(e.to_string());
            return Err(e);
        }
    };
    log_info(format!("Found {} CSV files.", files.len()));

    let (aggregate, reports) = collect(&files, &ColumnSchema::default(), config.encoding);
    log_info(format!("Total products found: {}", aggregate.len()));

    let csv = aggregate.to_csv()?;
    write_output(&config.output_file, &csv)?;
    log_success(format!("File generated successfully: {}", config.output_file.display()));

    Ok(RunReport {
        input_dir: config.input_dir.clone(),
        output_file: config.output_file.clone(),
        encoding: config.encoding,
        files_found: files.len(),
        files: reports,
        total_records: aggregate.len(),
        started_at,
        finished_at: chrono::Utc::now().to_rfc3339(),
    })
}
