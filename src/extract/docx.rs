//! DOCX backend.
//!
//! A DOCX file is a ZIP archive; the document body lives in `word/document.xml`.
//! Text runs are `<w:t>` elements and paragraphs are `<w:p>` elements, so a
//! lightweight scan over the XML is enough to recover the readable text without
//! a full XML parser.

use super::ExtractError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

pub(super) fn extract(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut archive = ZipArchive::new(file)?;

    let mut xml = String::new();
    match archive.by_name("word/document.xml") {
        Ok(mut part) => {
            part.read_to_string(&mut xml)
                .map_err(|source| ExtractError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ExtractError::DocxMissingDocument);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(paragraph_text(&xml))
}

/// Concatenate `<w:t>` run contents, one line per `<w:p>` paragraph.
fn paragraph_text(xml: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut remainder = xml;

    while let Some(open) = remainder.find('<') {
        let after_open = &remainder[open + 1..];
        let Some(close) = after_open.find('>') else {
            break;
        };
        let tag = &after_open[..close];
        let after_tag = &after_open[close + 1..];

        if tag == "w:t" || tag.starts_with("w:t ") {
            // Run content extends to the next tag.
            let end = after_tag.find('<').unwrap_or(after_tag.len());
            current.push_str(&decode_entities(&after_tag[..end]));
            remainder = &after_tag[end..];
            continue;
        }

        if tag == "/w:p" {
            let paragraph = current.trim().to_string();
            if !paragraph.is_empty() {
                paragraphs.push(paragraph);
            }
            current.clear();
        } else if tag.starts_with("w:tab") || tag.starts_with("w:br") {
            current.push(' ');
        }
        remainder = after_tag;
    }

    let trailing = current.trim();
    if !trailing.is_empty() {
        paragraphs.push(trailing.to_string());
    }

    paragraphs.join("\n")
}

/// Decode the predefined XML entities; anything else passes through untouched.
fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        decoded.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let (replacement, consumed) = if tail.starts_with("&amp;") {
            ("&", 5)
        } else if tail.starts_with("&lt;") {
            ("<", 4)
        } else if tail.starts_with("&gt;") {
            (">", 4)
        } else if tail.starts_with("&quot;") {
            ("\"", 6)
        } else if tail.starts_with("&apos;") {
            ("'", 6)
        } else {
            ("&", 1)
        };
        decoded.push_str(replacement);
        rest = &tail[consumed..];
    }
    decoded.push_str(rest);

    decoded
}
