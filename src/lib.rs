//! # word2pdf
//!
//! Convert Word documents to PDF through a remote conversion service.
//!
//! ## Why this crate?
//!
//! The conversion itself (layout, fonts, pagination) is the hard part and it
//! lives in a dedicated service behind one small HTTP contract. This crate
//! is the client side done properly: it validates the input, derives a
//! metadata summary (size, modification time, naive word count) while the
//! upload is in flight, submits the document as multipart form data, and
//! writes the returned PDF atomically — with every failure mode surfaced as
//! a readable error rather than a silent no-op.
//!
//! ## Workflow Overview
//!
//! ```text
//! document.docx
//!  │
//!  ├─ 1. Select   validate path + Word magic bytes
//!  ├─ 2. Extract  word/document.xml → raw text → word count  (concurrent)
//!  ├─ 3. Submit   multipart POST to the conversion endpoint
//!  └─ 4. Save     atomic write of the PDF to <stem>.pdf
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use word2pdf::{run, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default(); // POSTs to localhost:3000/convertFile
//!     let outcome = run("report.docx", &config).await?;
//!     println!("saved {}", outcome.conversion.pdf_path.display());
//!     if let Some(meta) = outcome.metadata {
//!         println!("~{} words", meta.word_count.unwrap_or(0));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Service contract
//!
//! | Exchange | Shape |
//! |----------|-------|
//! | Request  | `POST {endpoint}`, multipart, document under field `file` |
//! | Success  | HTTP 200, body = PDF bytes |
//! | Rejection| HTTP 400, body = `{ "message": string }` |
//! | Other    | normalised into [`Word2PdfError::Upstream`] and friends |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `word2pdf` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! word2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_ENDPOINT, UPLOAD_FIELD_NAME};
pub use convert::{
    convert, convert_with_session, extract_metadata, run, run_sync, select, ConversionOutcome,
    RunOutcome,
};
pub use error::{ExtractError, Word2PdfError};
pub use metadata::{word_count, FileMetadata};
pub use pipeline::extract::{DocxRawText, TextExtractor};
pub use pipeline::input::{SelectedFile, WordKind};
pub use session::{NoopObserver, Session, SessionObserver, SessionState};
