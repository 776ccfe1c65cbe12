//! Download pipeline configuration from TOML
//!
//! The downloader is driven by a fixed configuration file rather than
//! flags: spreadsheet location, sheet/column names, the data-row range
//! to scan, and output paths. Every field has a default so an empty
//! file (or a missing one, via [`DownloadConfig::load`]) still yields a
//! usable configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default config file looked up next to the working directory
const DEFAULT_CONFIG_FILE: &str = "cvpipe.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Spreadsheet with the URL column
    pub spreadsheet: PathBuf,
    /// Sheet name within the workbook
    pub sheet: String,
    /// Header of the column holding the URLs
    pub column: String,
    /// Directory downloaded PDFs are written to
    pub output_dir: PathBuf,
    /// Final zip archive path
    pub archive: PathBuf,
    /// Data-row range to process, 0-based, end exclusive
    pub row_start: usize,
    pub row_end: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Concurrent download budget
    pub workers: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            spreadsheet: PathBuf::from("JobPlacements.xlsx"),
            sheet: "AP Subset".to_string(),
            column: "Website/Linkedin/CV".to_string(),
            output_dir: PathBuf::from("cvs"),
            archive: PathBuf::from("cvs.zip"),
            row_start: 0,
            row_end: 6000,
            timeout_secs: 10,
            workers: 10,
        }
    }
}

impl DownloadConfig {
    /// Read configuration from an explicit TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// Load `cvpipe.toml` from the working directory, or defaults when
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
