//! PDF text-extraction collaborator

use std::path::Path;

use cvpipe_core::UnitError;

/// Extract plain text from a PDF file.
///
/// A document that yields no text at all (scanned images, empty pages)
/// is a per-unit failure; downstream has nothing to work with.
pub fn extract_text(path: &Path) -> Result<String, UnitError> {
    let text = pdf_extract::extract_text(path).map_err(|e| UnitError::Pdf {
        message: e.to_string(),
    })?;
    if text.trim().is_empty() {
        return Err(UnitError::Pdf {
            message: format!("no text extracted from {}", path.display()),
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_per_unit_error() {
        let err = extract_text(Path::new("/nonexistent/1.pdf")).unwrap_err();
        assert!(matches!(err, UnitError::Pdf { .. }));
    }

    #[test]
    fn garbage_bytes_are_per_unit_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();
        assert!(extract_text(&path).is_err());
    }
}
