//! Download unit processor
//!
//! One URL in, one `<identity>.pdf` on disk out. Dropbox share links
//! are rewritten to their direct-download form first; anything whose
//! path does not end in `.pdf` is rejected before any network call.
//! The suffix check is a cheap heuristic, not a content-type sniff, so
//! it can have false negatives — kept deliberately since a wrong guess
//! only skips one row.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cvpipe_core::{UnitError, WorkItem, get_to_file};

/// Rewrite a Dropbox share link to its direct-download form.
///
/// `dl=0` becomes `dl=1`; a Dropbox link without the parameter gets
/// `&dl=1` appended. Non-Dropbox URLs pass through untouched.
pub fn normalize_dropbox(url: &str) -> Cow<'_, str> {
    if !url.contains("dropbox.com") {
        return Cow::Borrowed(url);
    }
    if url.contains("dl=0") {
        Cow::Owned(url.replace("dl=0", "dl=1"))
    } else {
        Cow::Owned(format!("{url}&dl=1"))
    }
}

/// Whether the URL path (query and fragment stripped) ends in `.pdf`.
pub fn is_pdf_url(url: &str) -> bool {
    let trimmed = url.split('#').next().unwrap_or(url);
    let trimmed = trimmed.split('?').next().unwrap_or(trimmed);
    // Skip past scheme and authority, if present
    let path = match trimmed.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or(""),
        None => trimmed,
    };
    path.to_ascii_lowercase().ends_with(".pdf")
}

/// Download one CV, returning bytes written.
///
/// The destination is `<identity>.pdf` under `out_dir`; re-running
/// overwrites silently since the identity is the primary key.
pub fn download(
    item: &WorkItem<String>,
    out_dir: &Path,
    timeout: Duration,
) -> Result<u64, UnitError> {
    let url = normalize_dropbox(&item.payload);
    if !is_pdf_url(&url) {
        return Err(UnitError::NotADocument {
            url: url.into_owned(),
        });
    }
    let dest = document_path(out_dir, item.identity);
    let written = get_to_file(&url, &dest, timeout)?;
    log::info!("row {}: downloaded {} bytes from {url}", item.identity, written);
    Ok(written)
}

/// Identity-derived destination path; the path scheme itself is the
/// concurrency-safety mechanism, so no locking is needed.
pub fn document_path(out_dir: &Path, identity: u32) -> PathBuf {
    out_dir.join(format!("{identity}.pdf"))
}
