//! Download subcommand
//!
//! Spreadsheet location, sheet/column names, row range, and output
//! paths come from the TOML configuration file; only operational knobs
//! are flags.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use cvpipe_core::SharedProgress;
use cvpipe_download::DownloadConfig;

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Config file path (default: ./cvpipe.toml, built-in defaults if absent)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured worker budget
    #[arg(short, long)]
    pub workers: Option<usize>,
}

pub fn run(args: DownloadArgs, progress: &SharedProgress) -> Result<()> {
    let mut config = match args.config {
        Some(ref path) => DownloadConfig::from_file(path)?,
        None => DownloadConfig::load()?,
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    cvpipe_download::run(&config, progress)
}
