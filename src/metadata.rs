//! Derived document metadata and the word-count rule.
//!
//! Metadata is a client-side convenience: name, size, and modification time
//! come from the filesystem, the word count from a raw-text pass over the
//! document. Nothing here is authoritative — the conversion service never
//! sees or checks any of it.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Client-side summary of a selected document.
///
/// Recomputed wholesale whenever the selection changes; a summary always
/// describes exactly one selection (see the generation tagging in
/// [`crate::session::Session`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMetadata {
    /// Original file name, extension included.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// Filesystem modification time, when available.
    pub last_modified: Option<DateTime<Utc>>,
    /// Naive whitespace word count; `None` when raw text could not be
    /// extracted (legacy `.doc`, forced non-docx uploads).
    pub word_count: Option<usize>,
}

impl FileMetadata {
    /// File size in kilobytes, as shown to the user.
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

/// Count words by splitting on single ASCII spaces, **counting empty tokens**.
///
/// This deliberately reproduces the naive heuristic of the original UI
/// (`text.split(' ').length`), quirks and all:
///
/// * `"a b  c"` → 4 (the double space contributes an empty token)
/// * `""` → 1 (splitting the empty string yields one empty token)
/// * leading/trailing spaces each add one empty token
/// * other whitespace (`\n`, `\t`) does not split at all
///
/// It is a rough size indicator, not a linguistic word counter. The exact
/// semantics are pinned by tests below; do not "fix" them without changing
/// the displayed contract.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_simple() {
        assert_eq!(word_count("hello world"), 2);
    }

    #[test]
    fn word_count_double_space_counts_empty_token() {
        // "a b  c" splits into ["a", "b", "", "c"]
        assert_eq!(word_count("a b  c"), 4);
    }

    #[test]
    fn word_count_empty_string_is_one() {
        assert_eq!(word_count(""), 1);
    }

    #[test]
    fn word_count_leading_and_trailing_spaces() {
        assert_eq!(word_count(" a"), 2);
        assert_eq!(word_count("a "), 2);
        assert_eq!(word_count(" a "), 3);
    }

    #[test]
    fn word_count_ignores_other_whitespace() {
        // Newlines and tabs are not delimiters under the split-on-space rule.
        assert_eq!(word_count("a\nb"), 1);
        assert_eq!(word_count("para one\n\npara two"), 3);
    }

    #[test]
    fn size_kb_two_decimal_display() {
        let meta = FileMetadata {
            name: "report.docx".into(),
            size: 12_634,
            last_modified: None,
            word_count: Some(1_042),
        };
        assert_eq!(format!("{:.2}", meta.size_kb()), "12.34");
    }

    #[test]
    fn metadata_serialises_to_json() {
        let meta = FileMetadata {
            name: "report.docx".into(),
            size: 2048,
            last_modified: None,
            word_count: Some(3),
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert!(json.contains("\"name\":\"report.docx\""));
        assert!(json.contains("\"word_count\":3"));
    }
}
