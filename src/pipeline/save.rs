//! Atomic output writing.
//!
//! The PDF is written to a temp file in the destination directory and then
//! renamed into place, so an interrupted run never leaves a truncated
//! `.pdf` behind. Rename is atomic only within a filesystem, which is why
//! the temp file sits next to the destination rather than in `/tmp`.

use crate::error::Word2PdfError;
use std::path::Path;
use tracing::debug;

/// Write `bytes` to `path` atomically (temp file + rename).
pub async fn save_pdf(bytes: &[u8], path: &Path) -> Result<(), Word2PdfError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Word2PdfError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("pdf.tmp");
    tokio::fs::write(&tmp_path, bytes)
        .await
        .map_err(|e| Word2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Word2PdfError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!(path = %path.display(), bytes = bytes.len(), "PDF written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_bytes_to_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");
        save_pdf(b"%PDF-1.4 fake", &dest).await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-1.4 fake");
        // No temp file left behind.
        assert!(!dir.path().join("out.pdf.tmp").exists());
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested/deeper/out.pdf");
        save_pdf(b"%PDF-1.4", &dest).await.unwrap();
        assert!(dest.exists());
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");
        std::fs::write(&dest, b"old").unwrap();
        save_pdf(b"%PDF new", &dest).await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF new");
    }
}
