//! Raw-text extraction for the word count.
//!
//! A `.docx` file is a zip archive whose main content lives in
//! `word/document.xml` as WordprocessingML. For a word count we do not need
//! styles, numbering, tables, or images — only the visible text runs
//! (`<w:t>` elements), concatenated in document order. Paragraph boundaries
//! (`</w:p>`) become blank lines and explicit breaks (`<w:br/>`) become
//! newlines, matching what a raw-text extractor produces.
//!
//! Extraction failures never fail a conversion: the result feeds a display
//! heuristic, nothing more.

use crate::error::ExtractError;
use crate::metadata::{word_count, FileMetadata};
use crate::pipeline::input::{SelectedFile, WordKind};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::sync::Arc;
use tracing::debug;
use zip::ZipArchive;

/// Turns raw document bytes into plain text.
///
/// Seam for the word-count heuristic: the default implementation parses
/// docx; tests can inject a canned extractor.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// The built-in extractor: zip container + `word/document.xml` text runs.
pub struct DocxRawText;

impl TextExtractor for DocxRawText {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let xml = read_document_xml(bytes)?;
        collect_text_runs(&xml)
    }
}

/// Pull `word/document.xml` out of the archive as a string.
fn read_document_xml(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::BadArchive {
            detail: e.to_string(),
        })?;

    let mut entry =
        archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractError::MissingDocumentXml {
                detail: e.to_string(),
            })?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::MalformedXml {
            detail: format!("not valid UTF-8: {e}"),
        })?;
    Ok(xml)
}

/// Walk the XML event stream and concatenate the visible text.
///
/// Only text inside `<w:t>` is collected; everything else in the body
/// (properties, footnote refs, drawing payloads) is skipped. Text events are
/// not trimmed — run-internal whitespace is significant for the word count.
fn collect_text_runs(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => {
                in_text_run = true;
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:br" => {
                text.push('\n');
            }
            Ok(Event::Text(t)) if in_text_run => {
                let chunk = t.unescape().map_err(|e| ExtractError::MalformedXml {
                    detail: e.to_string(),
                })?;
                text.push_str(&chunk);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ExtractError::MalformedXml {
                    detail: e.to_string(),
                });
            }
        }
        buf.clear();
    }

    while text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Derive [`FileMetadata`] for a selection.
///
/// Reads the file, runs the extractor in `spawn_blocking` (zip + XML parsing
/// is blocking work), and computes the naive word count. Legacy `.doc` and
/// forced non-docx files get metadata without a word count — there is
/// nothing to extract locally.
pub async fn extract_metadata(
    file: &SelectedFile,
    extractor: Arc<dyn TextExtractor>,
) -> Result<FileMetadata, ExtractError> {
    let mut metadata = FileMetadata {
        name: file.name.clone(),
        size: file.size,
        last_modified: file.last_modified,
        word_count: None,
    };

    if file.kind != Some(WordKind::Docx) {
        debug!(name = %file.name, "no raw-text extractor for this format, word count omitted");
        return Ok(metadata);
    }

    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| ExtractError::Io {
            detail: e.to_string(),
        })?;

    let text = tokio::task::spawn_blocking(move || extractor.extract_text(&bytes))
        .await
        .map_err(|e| ExtractError::Io {
            detail: format!("extraction task failed: {e}"),
        })??;

    metadata.word_count = Some(word_count(&text));
    debug!(
        name = %metadata.name,
        words = metadata.word_count,
        "metadata extracted"
    );
    Ok(metadata)
}
