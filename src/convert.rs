//! Conversion entry points.
//!
//! Three altitudes, lowest to highest:
//!
//! * [`convert`] — submit one already-selected file and save the PDF. No
//!   session, no metadata.
//! * [`convert_with_session`] — the same, but driving a
//!   [`Session`](crate::session::Session) so the in-flight state is held on
//!   every exit path and the selection is cleared only on success.
//! * [`run`] — the full workflow: select, start metadata extraction
//!   concurrently, convert, join. This is what the CLI calls; it mirrors the
//!   original control flow where extraction is already underway while the
//!   conversion request is in flight.

use crate::config::ClientConfig;
use crate::error::Word2PdfError;
use crate::metadata::FileMetadata;
use crate::pipeline::extract::{self, DocxRawText, TextExtractor};
use crate::pipeline::{input, save, submit};
use crate::session::Session;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// What a successful conversion produced.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Where the PDF was written.
    pub pdf_path: PathBuf,
    /// Size of the PDF body in bytes.
    pub pdf_bytes: usize,
    /// Wall-clock duration of submit + save.
    pub duration_ms: u64,
}

/// Result of the full [`run`] workflow.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub conversion: ConversionOutcome,
    /// Metadata for the converted file; `None` when extraction was skipped
    /// or failed (extraction failures are non-fatal).
    pub metadata: Option<FileMetadata>,
}

/// Validate a path and describe the file, without converting anything.
pub fn select(path: impl AsRef<Path>, config: &ClientConfig) -> Result<input::SelectedFile, Word2PdfError> {
    input::select(path, config.force)
}

/// Derive metadata for a selected file. No network, no endpoint.
///
/// This is the standalone metadata operation behind the CLI's
/// `--inspect-only`; extraction errors are returned here rather than logged
/// because the caller asked for exactly this.
pub async fn extract_metadata(
    file: &input::SelectedFile,
    config: &ClientConfig,
) -> Result<FileMetadata, crate::error::ExtractError> {
    extract::extract_metadata(file, configured_extractor(config)).await
}

/// Submit `file` to the conversion service and save the returned PDF to
/// `<stem>.pdf`.
pub async fn convert(
    file: &input::SelectedFile,
    config: &ClientConfig,
) -> Result<ConversionOutcome, Word2PdfError> {
    let start = Instant::now();

    let pdf = submit::submit(file, config).await?;
    let pdf_path = file.pdf_output_path(config.output_dir.as_deref());
    save::save_pdf(&pdf, &pdf_path).await?;

    let outcome = ConversionOutcome {
        pdf_path,
        pdf_bytes: pdf.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        path = %outcome.pdf_path.display(),
        bytes = outcome.pdf_bytes,
        ms = outcome.duration_ms,
        "conversion complete"
    );
    Ok(outcome)
}

/// Convert the session's current selection.
///
/// The session is `Converting` strictly between submission start and
/// settlement: success clears the selection, any failure settles into
/// `Failed` with the selection retained. With no selection, this returns
/// [`Word2PdfError::NoFileSelected`] before any network activity.
pub async fn convert_with_session(
    session: &mut Session,
    config: &ClientConfig,
) -> Result<ConversionOutcome, Word2PdfError> {
    let file = session.begin_conversion()?;
    match convert(&file, config).await {
        Ok(outcome) => {
            session.finish_success();
            Ok(outcome)
        }
        Err(e) => {
            session.finish_failure(&e);
            Err(e)
        }
    }
}

/// The full workflow for one file: select, extract metadata concurrently,
/// convert, join.
pub async fn run(
    path: impl AsRef<Path>,
    config: &ClientConfig,
) -> Result<RunOutcome, Word2PdfError> {
    let file = input::select(path, config.force)?;

    let mut session = match config.observer.clone() {
        Some(observer) => Session::with_observer(observer),
        None => Session::new(),
    };
    let generation = session.select(file.clone());

    // Extraction runs while the conversion request is in flight, exactly as
    // the original UI fired it at selection time.
    let metadata_task = if config.skip_metadata {
        None
    } else {
        let file = file.clone();
        let extractor = configured_extractor(config);
        Some(tokio::spawn(async move {
            extract::extract_metadata(&file, extractor).await
        }))
    };

    let conversion = convert_with_session(&mut session, config).await;

    let metadata = match metadata_task {
        Some(task) => match task.await {
            Ok(Ok(metadata)) => {
                session.apply_metadata(generation, metadata.clone());
                Some(metadata)
            }
            Ok(Err(e)) => {
                session.extraction_failed(generation, &e);
                None
            }
            Err(e) => {
                warn!(%e, "metadata task panicked");
                None
            }
        },
        None => None,
    };

    Ok(RunOutcome {
        conversion: conversion?,
        metadata,
    })
}

/// Blocking wrapper around [`run`].
///
/// Creates a temporary tokio runtime internally.
pub fn run_sync(
    path: impl AsRef<Path>,
    config: &ClientConfig,
) -> Result<RunOutcome, Word2PdfError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Word2PdfError::Internal(format!("failed to create tokio runtime: {e}")))?
        .block_on(run(path, config))
}

fn configured_extractor(config: &ClientConfig) -> Arc<dyn TextExtractor> {
    config
        .extractor
        .clone()
        .unwrap_or_else(|| Arc::new(DocxRawText))
}
