//! Error types for the word2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Word2PdfError`] — **Fatal**: the conversion cannot proceed or did not
//!   produce a PDF (no file selected, unreadable input, the service rejected
//!   or failed the request). Returned as `Err(Word2PdfError)` from the
//!   top-level `convert*` functions. Every failure cause has its own variant
//!   with a human-readable message, so nothing settles silently.
//!
//! * [`ExtractError`] — **Non-fatal**: metadata extraction failed (corrupt
//!   archive, missing `word/document.xml`, malformed XML). The conversion
//!   itself is unaffected; the session simply keeps its previous metadata and
//!   the failure is logged.
//!
//! The separation mirrors how the workflow treats the two paths: submission
//! failures must reach the user, metadata failures must not block anything.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the word2pdf library.
///
/// Metadata-extraction failures use [`ExtractError`] and are logged rather
/// than propagated here.
#[derive(Debug, Error)]
pub enum Word2PdfError {
    // ── User input errors ─────────────────────────────────────────────────
    /// Conversion was requested without a selected file.
    #[error("Please select a file")]
    NoFileSelected,

    /// A conversion request is already outstanding for this session.
    #[error("A conversion is already in progress")]
    ConversionInFlight,

    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is neither a `.docx` zip container
    /// nor a legacy `.doc` OLE file.
    #[error("File is not a Word document: '{path}'\nFirst bytes: {magic:?}\nPass --force to submit it anyway.")]
    NotAWordDocument { path: PathBuf, magic: [u8; 4] },

    // ── Conversion service errors ─────────────────────────────────────────
    /// The service refused the document (HTTP 400 with a JSON `message`).
    ///
    /// The display string is surfaced verbatim to the user.
    #[error("Error occurred: {message}")]
    Rejected { message: String },

    /// The service answered with an unexpected status code.
    #[error("Conversion service returned HTTP {status}: {detail}")]
    Upstream { status: u16, detail: String },

    /// The service could not be reached at all.
    #[error("Could not reach conversion service at '{endpoint}': {reason}")]
    Network { endpoint: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Conversion request timed out after {secs}s for '{endpoint}'\nIncrease --timeout.")]
    Timeout { endpoint: String, secs: u64 },

    /// The service answered 200 but the body does not look like a PDF.
    #[error("Conversion service returned a non-PDF body\nFirst bytes: {magic:?}")]
    NotAPdfResponse { magic: [u8; 4] },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Word2PdfError {
    /// Whether the failure should leave the current selection intact so the
    /// user can fix the cause and resubmit. Only a successful conversion
    /// clears the selection, so this is true for every variant.
    pub fn keeps_selection(&self) -> bool {
        true
    }
}

/// A non-fatal metadata-extraction error.
///
/// Logged by the session; never surfaced as a conversion failure.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// The file could not be opened as a zip archive.
    #[error("not a readable docx archive: {detail}")]
    BadArchive { detail: String },

    /// The archive has no `word/document.xml` entry.
    #[error("missing word/document.xml: {detail}")]
    MissingDocumentXml { detail: String },

    /// `word/document.xml` exists but is not well-formed XML.
    #[error("malformed document XML: {detail}")]
    MalformedXml { detail: String },

    /// Reading the file from disk failed.
    #[error("could not read file: {detail}")]
    Io { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_selected_display() {
        assert_eq!(
            Word2PdfError::NoFileSelected.to_string(),
            "Please select a file"
        );
    }

    #[test]
    fn rejected_display_is_verbatim() {
        let e = Word2PdfError::Rejected {
            message: "bad format".into(),
        };
        assert_eq!(e.to_string(), "Error occurred: bad format");
    }

    #[test]
    fn upstream_display() {
        let e = Word2PdfError::Upstream {
            status: 503,
            detail: "overloaded".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("503"), "got: {msg}");
        assert!(msg.contains("overloaded"));
    }

    #[test]
    fn timeout_display_names_endpoint() {
        let e = Word2PdfError::Timeout {
            endpoint: "http://localhost:3000/convertFile".into(),
            secs: 120,
        };
        assert!(e.to_string().contains("120s"));
        assert!(e.to_string().contains("convertFile"));
    }

    #[test]
    fn every_failure_keeps_the_selection() {
        let errors = [
            Word2PdfError::NoFileSelected,
            Word2PdfError::Rejected {
                message: "nope".into(),
            },
            Word2PdfError::Network {
                endpoint: "http://localhost:3000".into(),
                reason: "connection refused".into(),
            },
        ];
        for e in errors {
            assert!(e.keeps_selection());
        }
    }
}
