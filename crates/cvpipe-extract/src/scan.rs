//! Directory enumerator for the extraction pipeline
//!
//! Work items come from `*.pdf` files whose stem is the spreadsheet row
//! number the downloader wrote them under. A non-numeric stem is a
//! defined error, not an assumed-safe conversion: the file is rejected
//! with a logged `InvalidIdentity` and excluded from the batch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use cvpipe_core::{UnitError, WorkItem};

/// Parse a document's identity from its filename stem.
pub fn parse_identity(path: &Path) -> Result<u32, UnitError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    stem.parse().map_err(|_| UnitError::InvalidIdentity {
        name: stem.to_string(),
    })
}

/// Enumerate PDF work items from `dir`, sorted ascending by identity.
///
/// A missing or non-directory input path is fatal; files with
/// non-numeric stems are logged and skipped.
pub fn scan_documents(dir: &Path) -> Result<Vec<WorkItem<PathBuf>>> {
    ensure!(
        dir.is_dir(),
        "input path is not a directory: {}",
        dir.display()
    );

    let pattern = dir.join("*.pdf");
    let pattern = pattern
        .to_str()
        .with_context(|| format!("non-UTF8 input path: {}", dir.display()))?;

    let mut items = Vec::new();
    for entry in glob::glob(pattern).context("invalid glob pattern")? {
        let path = entry.context("cannot read directory entry")?;
        match parse_identity(&path) {
            Ok(identity) => items.push(WorkItem {
                identity,
                payload: path,
            }),
            Err(e) => log::warn!("{}: {e}", path.display()),
        }
    }
    items.sort_unstable_by_key(|item| item.identity);

    log::info!("found {} PDF files in {}", items.len(), dir.display());
    Ok(items)
}
