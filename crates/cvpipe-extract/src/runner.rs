//! Extraction pipeline orchestration: scan → extract → window → LLM → CSV

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use cvpipe_core::{BatchSummary, SharedProgress, run_batch};

use crate::backend::CompletionBackend;
use crate::context::context_window;
use crate::pdf;
use crate::scan;
use crate::table;

/// Run the extraction pipeline end-to-end.
///
/// Per-unit failures (unreadable PDF, network error, unparseable LLM
/// reply) are logged and skipped; the CSV always contains every unit
/// that succeeded.
pub fn run(
    input_dir: &Path,
    output_csv: &Path,
    backend: &dyn CompletionBackend,
    workers: usize,
    progress: &SharedProgress,
) -> Result<()> {
    let items = scan::scan_documents(input_dir)?;
    if items.is_empty() {
        log::info!("no PDF files found in {}, nothing to do", input_dir.display());
        return Ok(());
    }

    let results = run_batch("extract", &items, workers, progress, |item| {
        let text = pdf::extract_text(&item.payload)?;
        let context = context_window(&text, backend.kind());
        let record = backend.extract(context)?;
        log::info!("row {}: extracted education history", item.identity);
        Ok(record)
    });
    let summary = BatchSummary::from_results(&results);

    let written = table::write_csv(output_csv, backend.kind(), results)?;

    progress.println(format!(
        "\n{}",
        summary_table(&summary, written, output_csv)
    ));
    Ok(())
}

fn summary_table(summary: &BatchSummary, written: usize, output_csv: &Path) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Extraction run").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    table.add_row(vec!["Documents", &summary.total.to_string()]);
    table.add_row(vec!["Extracted", &summary.succeeded.to_string()]);
    table.add_row(vec!["Failed", &summary.failed.to_string()]);
    table.add_row(vec!["CSV rows", &written.to_string()]);
    table.add_row(vec!["Output", &output_csv.display().to_string()]);
    table
}
