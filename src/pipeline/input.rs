//! Input resolution: validate a user-supplied path and describe the file.
//!
//! ## Why validate magic bytes up front?
//!
//! The conversion service rejects non-Word uploads with HTTP 400 anyway, but
//! a local check turns "upload, wait, get rejected" into an instant error
//! with the actual bytes in the message. `.docx` is an OOXML zip container
//! (`PK\x03\x04`); legacy `.doc` is an OLE compound file
//! (`\xD0\xCF\x11\xE0`). Callers that want the original defer-to-service
//! behaviour pass `force = true`.

use crate::error::Word2PdfError;
use chrono::{DateTime, Utc};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Magic bytes of an OOXML (`.docx`) zip container.
const DOCX_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Magic bytes of an OLE compound file (legacy `.doc`).
const DOC_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

/// Which flavour of Word document the magic bytes identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    /// OOXML `.docx` — a zip archive; raw text is extractable.
    Docx,
    /// Legacy binary `.doc` — submitted as-is; no local text extraction.
    Doc,
}

impl WordKind {
    /// MIME type used for the multipart upload part.
    pub fn mime(&self) -> &'static str {
        match self {
            WordKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            WordKind::Doc => "application/msword",
        }
    }
}

/// The currently selected document: the path plus the identity fields the
/// metadata panel displays.
///
/// Replaced wholesale on each new selection; cleared on successful
/// conversion (see [`crate::session::Session`]).
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// Validated local path.
    pub path: PathBuf,
    /// Original file name, extension included.
    pub name: String,
    /// File size in bytes.
    pub size: u64,
    /// Filesystem modification time, when the platform reports one.
    pub last_modified: Option<DateTime<Utc>>,
    /// Detected document flavour; `None` when selected with `force` and the
    /// magic bytes matched neither format.
    pub kind: Option<WordKind>,
}

impl SelectedFile {
    /// MIME type for the upload. Unrecognised (forced) files fall back to a
    /// generic byte stream.
    pub fn mime(&self) -> &'static str {
        match self.kind {
            Some(kind) => kind.mime(),
            None => "application/octet-stream",
        }
    }

    /// Where the converted PDF lands: `<stem>.pdf`, in `output_dir` if given,
    /// otherwise next to the input file.
    pub fn pdf_output_path(&self, output_dir: Option<&Path>) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "converted".to_string());
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| self.path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(format!("{stem}.pdf"))
    }
}

/// Validate `path` and produce a [`SelectedFile`].
///
/// Checks existence, readability, and (unless `force`) the Word magic
/// bytes. Never reads more than the first four bytes.
pub fn select(path: impl AsRef<Path>, force: bool) -> Result<SelectedFile, Word2PdfError> {
    let path = path.as_ref().to_path_buf();

    let fs_meta = match std::fs::metadata(&path) {
        Ok(m) if m.is_file() => m,
        Ok(_) => return Err(Word2PdfError::FileNotFound { path }),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Word2PdfError::PermissionDenied { path });
        }
        Err(_) => return Err(Word2PdfError::FileNotFound { path }),
    };

    let magic = read_magic(&path)?;
    let kind = match magic {
        m if m == DOCX_MAGIC => Some(WordKind::Docx),
        m if m == DOC_MAGIC => Some(WordKind::Doc),
        m => {
            if !force {
                return Err(Word2PdfError::NotAWordDocument { path, magic: m });
            }
            None
        }
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let last_modified = fs_meta.modified().ok().map(DateTime::<Utc>::from);

    debug!(
        name = %name,
        size = fs_meta.len(),
        kind = ?kind,
        "selected file"
    );

    Ok(SelectedFile {
        path,
        name,
        size: fs_meta.len(),
        last_modified,
        kind,
    })
}

/// Read the first four bytes of the file. Short files yield zero-padding so
/// the magic comparison simply fails.
fn read_magic(path: &Path) -> Result<[u8; 4], Word2PdfError> {
    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Word2PdfError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(Word2PdfError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };
    let mut magic = [0u8; 4];
    let mut filled = 0;
    while filled < 4 {
        match file.read(&mut magic[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) => {
                return Err(Word2PdfError::Internal(format!(
                    "reading '{}': {e}",
                    path.display()
                )));
            }
        }
    }
    Ok(magic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn select_nonexistent_file() {
        let err = select("/definitely/not/a/real/file.docx", false).unwrap_err();
        assert!(matches!(err, Word2PdfError::FileNotFound { .. }));
    }

    #[test]
    fn select_detects_docx_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "report.docx", b"PK\x03\x04rest-of-zip");
        let file = select(&path, false).unwrap();
        assert_eq!(file.kind, Some(WordKind::Docx));
        assert_eq!(file.name, "report.docx");
        assert_eq!(file.size, 15);
        assert!(file.last_modified.is_some());
    }

    #[test]
    fn select_detects_legacy_doc_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "old.doc", &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1]);
        let file = select(&path, false).unwrap();
        assert_eq!(file.kind, Some(WordKind::Doc));
        assert_eq!(file.mime(), "application/msword");
    }

    #[test]
    fn select_rejects_unrecognised_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "notes.txt", b"just some text");
        let err = select(&path, false).unwrap_err();
        match err {
            Word2PdfError::NotAWordDocument { magic, .. } => {
                assert_eq!(&magic, b"just");
            }
            other => panic!("expected NotAWordDocument, got {other:?}"),
        }
    }

    #[test]
    fn force_accepts_unrecognised_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "notes.txt", b"just some text");
        let file = select(&path, true).unwrap();
        assert_eq!(file.kind, None);
        assert_eq!(file.mime(), "application/octet-stream");
    }

    #[test]
    fn short_file_is_not_a_word_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "tiny.docx", b"PK");
        let err = select(&path, false).unwrap_err();
        assert!(matches!(err, Word2PdfError::NotAWordDocument { .. }));
    }

    #[test]
    fn pdf_output_path_replaces_extension() {
        let file = SelectedFile {
            path: PathBuf::from("/docs/thesis.final.docx"),
            name: "thesis.final.docx".into(),
            size: 1,
            last_modified: None,
            kind: Some(WordKind::Docx),
        };
        // Only the last extension is replaced, like the original UI did.
        assert_eq!(
            file.pdf_output_path(None),
            PathBuf::from("/docs/thesis.final.pdf")
        );
        assert_eq!(
            file.pdf_output_path(Some(Path::new("/out"))),
            PathBuf::from("/out/thesis.final.pdf")
        );
    }
}
