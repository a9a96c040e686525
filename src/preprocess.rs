//! Normalization of extracted text into the token stream fed to the summarizer.
//!
//! The steps mirror a conventional text-analysis pipeline: word tokenization,
//! lowercasing, dropping punctuation-only tokens, and dropping English stopwords.
//! Surviving tokens are rejoined with single spaces in their original order.

use thiserror::Error;

/// Fixed English stopword set, sorted for binary search.
static STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m",
    "ma", "me", "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shan", "she", "should", "shouldn", "so", "some",
    "such", "t", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve",
    "very", "was", "wasn", "we", "were", "weren", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "wouldn", "y", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Errors raised while normalizing extracted text.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Extraction produced binary contamination instead of readable text.
    #[error("extracted text is not plain text (contains NUL)")]
    NotText,
}

/// Normalize raw text into the space-joined token stream the summarizer consumes.
///
/// Empty input yields empty output. The operation is idempotent: normalizing an
/// already-normalized string returns it unchanged.
pub fn normalize(text: &str) -> Result<String, PreprocessError> {
    if text.contains('\0') {
        return Err(PreprocessError::NotText);
    }

    let normalized: Vec<String> = tokenize(text)
        .into_iter()
        .map(|token| token.to_lowercase())
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .filter(|token| !is_stopword(token))
        .collect();

    Ok(normalized.join(" "))
}

/// Split text into word tokens and single-character punctuation tokens.
///
/// A word is a maximal run of alphanumeric characters; any other non-whitespace
/// character becomes its own token. Relative order is preserved.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            word.push(ch);
            continue;
        }
        if !word.is_empty() {
            tokens.push(std::mem::take(&mut word));
        }
        if !ch.is_whitespace() {
            tokens.push(ch.to_string());
        }
    }
    if !word.is_empty() {
        tokens.push(word);
    }

    tokens
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.binary_search(&token).is_ok()
}
