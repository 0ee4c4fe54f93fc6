//! gtin-extract CLI - merge GTIN/EAN products from a folder of CSV exports
//!
//! ```bash
//! gtin-extract                                  # arquivos/ -> produtos_com_gtin.csv
//! gtin-extract --input-dir exports --output all.csv
//! gtin-extract --encoding auto --report run.json
//! ```
//!
//! Paths can also come from `GTIN_INPUT_DIR`, `GTIN_OUTPUT_FILE` and
//! `GTIN_ENCODING` (environment or `.env`); flags win over both.

use clap::Parser;
use gtin_extract::logs::{log_info, LOGGER};
use gtin_extract::{run, Config, PipelineError, TextEncoding};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gtin-extract")]
#[command(about = "Extract products with a GTIN/EAN from a directory of CSV files", long_about = None)]
struct Cli {
    /// Directory containing the vendor CSV files
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Consolidated output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text encoding of the input files: utf8 or auto
    #[arg(short, long)]
    encoding: Option<TextEncoding>,

    /// Also write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Do not print progress
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.input_dir {
        config.input_dir = dir;
    }
    if let Some(output) = cli.output {
        config.output_file = output;
    }
    if let Some(encoding) = cli.encoding {
        config.encoding = encoding;
    }

    LOGGER.set_quiet(cli.quiet);

    match run(&config) {
        Ok(report) => {
            if let Some(path) = cli.report {
                fs::write(&path, report.to_json()?)?;
                log_info(format!("Report written to: {}", path.display()));
            }
            Ok(())
        }
        // Already logged; a missing input folder is not a failed run
        Err(PipelineError::InputDirNotFound(_)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
