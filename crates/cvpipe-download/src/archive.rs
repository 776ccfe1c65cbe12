//! Zip aggregation of downloaded CVs
//!
//! After all downloads resolve, every file present in the output
//! directory is packaged into one deflate-compressed archive. Entry
//! names are bare filenames: directory structure is flattened.

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Package every regular file in `dir` into `archive_path`.
///
/// Returns the number of entries written. Entries are added in sorted
/// filename order so re-runs produce identical archives.
pub fn build_archive(dir: &Path, archive_path: &Path) -> Result<usize> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read output directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let out = File::create(archive_path)
        .with_context(|| format!("cannot create archive: {}", archive_path.display()))?;
    let mut zip = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0usize;
    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("skipping file with non-UTF8 name: {}", path.display());
            continue;
        };
        zip.start_file(name, options)
            .with_context(|| format!("cannot add archive entry: {name}"))?;
        let mut file = File::open(&path)
            .with_context(|| format!("cannot read file: {}", path.display()))?;
        io::copy(&mut file, &mut zip)
            .with_context(|| format!("cannot write archive entry: {name}"))?;
        count += 1;
    }

    zip.finish().context("cannot finalize archive")?;
    log::info!(
        "archived {count} files into {}",
        archive_path.display()
    );
    Ok(count)
}
