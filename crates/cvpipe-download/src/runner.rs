//! Download pipeline orchestration: enumerate → execute → archive

use std::time::Duration;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use cvpipe_core::{BatchSummary, SharedProgress, run_batch};

use crate::archive;
use crate::config::DownloadConfig;
use crate::fetch;
use crate::sheet;

/// Run the download pipeline end-to-end.
///
/// Fatal errors (unreadable spreadsheet, unwritable archive) abort with
/// a non-zero exit; per-unit failures are logged and skipped, and the
/// run still produces a best-effort archive.
pub fn run(config: &DownloadConfig, progress: &SharedProgress) -> Result<()> {
    if !config.output_dir.exists() {
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "cannot create output directory: {}",
                config.output_dir.display()
            )
        })?;
        log::info!("created directory: {}", config.output_dir.display());
    }

    let items = sheet::enumerate(config)?;
    if items.is_empty() {
        log::info!("no links found in the configured row range, nothing to do");
        return Ok(());
    }

    let timeout = Duration::from_secs(config.timeout_secs);
    let results = run_batch("download", &items, config.workers, progress, |item| {
        fetch::download(item, &config.output_dir, timeout)
    });
    let summary = BatchSummary::from_results(&results);

    let archived = archive::build_archive(&config.output_dir, &config.archive)?;

    progress.println(format!("\n{}", summary_table(&summary, archived, config)));
    Ok(())
}

fn summary_table(summary: &BatchSummary, archived: usize, config: &DownloadConfig) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Download run").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    table.add_row(vec!["Links", &summary.total.to_string()]);
    table.add_row(vec!["Downloaded", &summary.succeeded.to_string()]);
    table.add_row(vec!["Failed", &summary.failed.to_string()]);
    table.add_row(vec!["Archive entries", &archived.to_string()]);
    table.add_row(vec!["Archive", &config.archive.display().to_string()]);
    table
}
