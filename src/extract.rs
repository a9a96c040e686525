//! Plain-text extraction from uploaded documents.
//!
//! Each supported format has its own backend: PDFs go through `pdf-extract`,
//! DOCX files are cracked open as ZIP archives and scanned for text runs, and
//! plain-text files are read verbatim. Unsupported extensions are rejected
//! before extraction is ever attempted, so the dispatcher only sees known
//! formats.

mod docx;
mod pdf;
mod txt;

use std::path::Path;
use thiserror::Error;

/// Upload formats the extractor understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word-processing document.
    Docx,
    /// Plain UTF-8 text.
    Txt,
}

impl DocumentFormat {
    /// Resolve a format from a bare extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Resolve a format from a filename's extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Errors raised while converting a document into plain text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file could not be read from disk.
    #[error("could not read {path}: {source}")]
    Io {
        /// Path of the file that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The PDF backend failed to parse the document.
    #[error("PDF parsing failed: {0}")]
    Pdf(#[from] pdf_extract::OutputError),
    /// The DOCX container could not be opened as a ZIP archive.
    #[error("DOCX archive could not be read: {0}")]
    DocxArchive(#[from] zip::result::ZipError),
    /// The DOCX archive is missing its main document part.
    #[error("invalid DOCX file: word/document.xml missing")]
    DocxMissingDocument,
}

/// Extract the full plain-text content of `path`, dispatching on `format`.
pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String, ExtractError> {
    match format {
        DocumentFormat::Pdf => pdf::extract(path),
        DocumentFormat::Docx => docx::extract(path),
        DocumentFormat::Txt => txt::extract(path),
    }
}
