//! Run configuration.
//!
//! Paths default to `arquivos/` and `produtos_com_gtin.csv` in the current
//! directory. They can be overridden from the environment (or a `.env` file)
//! and then from the command line.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::parser::TextEncoding;

/// Directory scanned for vendor CSV exports.
pub const DEFAULT_INPUT_DIR: &str = "arquivos";

/// Consolidated output file.
pub const DEFAULT_OUTPUT_FILE: &str = "produtos_com_gtin.csv";

/// Maximum log entries kept in memory.
pub const MAX_LOG_ENTRIES: usize = 1000;

/// Environment variable overriding the input directory.
pub const ENV_INPUT_DIR: &str = "GTIN_INPUT_DIR";

/// Environment variable overriding the output file.
pub const ENV_OUTPUT_FILE: &str = "GTIN_OUTPUT_FILE";

/// Environment variable selecting the text encoding (`utf8` or `auto`).
pub const ENV_ENCODING: &str = "GTIN_ENCODING";

/// Where to read from, where to write to, and how to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub encoding: TextEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            encoding: TextEncoding::default(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then apply `GTIN_*` variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ENV_INPUT_DIR) {
            config.input_dir = PathBuf::from(dir);
        }
        if let Some(file) = get(ENV_OUTPUT_FILE) {
            config.output_file = PathBuf::from(file);
        }
        if let Some(encoding) = get(ENV_ENCODING) {
            config.encoding = encoding.parse()?;
        }

        Ok(config)
    }
}
