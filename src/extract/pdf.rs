//! PDF backend built on the `pdf-extract` crate.

use super::ExtractError;
use std::path::Path;

/// Concatenate per-page text in page order. Pages with no extractable text
/// contribute an empty string rather than failing the whole document.
pub(super) fn extract(path: &Path) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_by_pages(path)?;
    tracing::debug!(file = %path.display(), pages = pages.len(), "Extracted PDF pages");
    Ok(pages.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rejects_non_pdf_bytes() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"this is not a pdf document").expect("write");

        assert!(extract(file.path()).is_err());
    }
}
