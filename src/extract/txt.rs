//! Plain-text backend: file contents are the extracted text.

use super::ExtractError;
use std::fs;
use std::path::Path;

pub(super) fn extract(path: &Path) -> Result<String, ExtractError> {
    fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn returns_file_contents_verbatim() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "line one\nline two\n").expect("write");

        let text = extract(file.path()).expect("extract");
        assert_eq!(text, "line one\nline two\n");
    }

    #[test]
    fn missing_file_reports_io_error() {
        let error = extract(Path::new("does/not/exist.txt")).expect_err("missing file");
        assert!(matches!(error, ExtractError::Io { .. }));
    }
}
