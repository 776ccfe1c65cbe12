//! cvpipe - CV batch download and education-history extraction
//!
//! Two pipelines share the same bounded-concurrency batch core:
//! `download` pulls PDF links out of a spreadsheet column and zips the
//! results; `extract` runs each downloaded PDF through an LLM backend
//! and emits a row-ordered CSV.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "cvpipe")]
#[command(about = "Batch CV download and education-history extraction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress info logs (only warnings and errors)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Download CVs listed in the configured spreadsheet column
    Download(cmd::download::DownloadArgs),
    /// Extract education history from downloaded PDFs into a CSV
    Extract(cmd::extract::ExtractArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(cvpipe_core::ProgressContext::new());

    // Logging:
    //   TTY:     bridge through MultiProgress so lines don't tear bars
    //   non-TTY: timestamped lines, the only progress indicator
    let multi = if progress.is_tty() {
        Some(progress.multi())
    } else {
        None
    };
    cvpipe_core::init_logging(cli.quiet, cli.debug, multi);

    match cli.command {
        Command::Download(args) => cmd::download::run(args, &progress),
        Command::Extract(args) => cmd::extract::run(args, &progress),
    }
}
