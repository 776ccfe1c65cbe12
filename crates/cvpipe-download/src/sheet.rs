//! Spreadsheet enumerator
//!
//! Reads one named column of one sheet over a configured data-row range
//! and produces the ordered work items. The identity is the 1-based row
//! number as a spreadsheet application displays it (header on row 1,
//! first data row on row 2), so output filenames are traceable back to
//! rows a person can look up — even after empty cells are skipped.

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use cvpipe_core::WorkItem;

use crate::config::DownloadConfig;

/// Rows occupied by the header before the first data row
const HEADER_ROWS: usize = 1;

/// Enumerate URL work items from the configured spreadsheet.
///
/// Fatal when the workbook, sheet, or column is missing; an empty
/// result is not an error.
pub fn enumerate(config: &DownloadConfig) -> Result<Vec<WorkItem<String>>> {
    let mut workbook = open_workbook_auto(&config.spreadsheet).with_context(|| {
        format!(
            "cannot open spreadsheet: {}",
            config.spreadsheet.display()
        )
    })?;
    let range = workbook
        .worksheet_range(&config.sheet)
        .with_context(|| format!("sheet not found: {}", config.sheet))?;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(h) => h,
        None => return Ok(Vec::new()),
    };
    let col = header
        .iter()
        .position(|cell| cell.to_string().trim() == config.column);
    let Some(col) = col else {
        bail!(
            "column {:?} not found in sheet {:?}",
            config.column,
            config.sheet
        );
    };

    let cells = rows.enumerate().map(|(data_idx, row)| {
        let value = match row.get(col) {
            Some(Data::Empty) | None => None,
            Some(cell) => Some(cell.to_string()),
        };
        (data_idx, value)
    });

    let items = collect_items(cells, config.row_start, config.row_end);
    log::info!(
        "selected {} links from rows {}..{} of {}",
        items.len(),
        config.row_start,
        config.row_end,
        config.spreadsheet.display()
    );
    Ok(items)
}

/// Build work items from `(data_row_index, cell)` pairs.
///
/// Keeps rows in `[row_start, row_end)`, drops empty/blank cells, and
/// derives the identity from the source position: data row 0 lives on
/// sheet row 2.
fn collect_items(
    cells: impl Iterator<Item = (usize, Option<String>)>,
    row_start: usize,
    row_end: usize,
) -> Vec<WorkItem<String>> {
    cells
        .filter(|(idx, _)| *idx >= row_start && *idx < row_end)
        .filter_map(|(idx, value)| {
            let url = value?;
            let url = url.trim();
            if url.is_empty() {
                return None;
            }
            Some(WorkItem {
                identity: (idx + HEADER_ROWS + 1) as u32,
                payload: url.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(idx: usize, v: &str) -> (usize, Option<String>) {
        (idx, Some(v.to_string()))
    }

    #[test]
    fn identity_is_sheet_row_number() {
        let items = collect_items(vec![cell(0, "https://a.test/x.pdf")].into_iter(), 0, 10);
        assert_eq!(items.len(), 1);
        // Data row 0 sits below the header on sheet row 2
        assert_eq!(items[0].identity, 2);
    }

    #[test]
    fn empty_and_blank_cells_dropped_identity_preserved() {
        let cells = vec![
            cell(0, "https://a.test/0.pdf"),
            (1, None),
            cell(2, "   "),
            cell(3, "https://a.test/3.pdf"),
        ];
        let items = collect_items(cells.into_iter(), 0, 10);
        let ids: Vec<u32> = items.iter().map(|i| i.identity).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn row_range_is_half_open() {
        let cells = (0..6).map(|i| cell(i, "https://a.test/x.pdf")).collect::<Vec<_>>();
        let items = collect_items(cells.into_iter(), 2, 4);
        let ids: Vec<u32> = items.iter().map(|i| i.identity).collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[test]
    fn payload_is_trimmed() {
        let items = collect_items(
            vec![cell(0, "  https://a.test/x.pdf \n")].into_iter(),
            0,
            10,
        );
        assert_eq!(items[0].payload, "https://a.test/x.pdf");
    }

    #[test]
    fn no_cells_yields_empty() {
        let items = collect_items(std::iter::empty(), 0, 100);
        assert!(items.is_empty());
    }
}
