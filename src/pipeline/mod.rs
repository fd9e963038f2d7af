//! Pipeline stages for the Word-to-PDF conversion workflow.
//!
//! Each submodule implements exactly one step. Keeping stages separate makes
//! each independently testable and lets us swap implementations (e.g. a
//! different text extractor) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract        (concurrent, non-fatal)
//!   │        (word count)
//!   └─────▶ submit ──▶ save
//!          (multipart)  (atomic write)
//! ```
//!
//! 1. [`input`]   — validate the user-supplied path and describe the file
//! 2. [`extract`] — derive the raw-text word count; runs in `spawn_blocking`
//!    because zip + XML parsing is blocking work
//! 3. [`submit`]  — the one multipart POST to the conversion service; the
//!    only stage with network I/O
//! 4. [`save`]    — write the returned PDF bytes atomically to disk

pub mod extract;
pub mod input;
pub mod save;
pub mod submit;
