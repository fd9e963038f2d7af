//! Session state machine for the conversion workflow.
//!
//! The workflow has two asynchronous operations that can be in flight at
//! once — metadata extraction and the conversion request — both of which
//! complete against shared state. Instead of ad hoc flags, the state lives
//! in an explicit machine:
//!
//! ```text
//! Idle ──select──▶ Extracting ──metadata──▶ Idle
//!   │                   │
//!   └──────begin_conversion──────▶ Converting ──▶ Succeeded
//!                                       │
//!                                       └───────▶ Failed(reason)
//! ```
//!
//! # Stale completions
//!
//! A user can reselect a file while the previous selection's extraction is
//! still running. Every selection bumps a monotonically increasing
//! **generation**; extraction results carry the generation they were started
//! for and [`Session::apply_metadata`] discards any result whose generation
//! no longer matches. The slow old extraction can therefore never overwrite
//! the new selection's metadata.
//!
//! The session is plain single-threaded data: completions are applied by
//! whoever owns the `Session`, not from callback threads.

use crate::error::{ExtractError, Word2PdfError};
use crate::metadata::FileMetadata;
use crate::pipeline::input::SelectedFile;
use std::sync::Arc;
use tracing::{debug, warn};

/// Observable workflow state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No asynchronous operation outstanding.
    Idle,
    /// Metadata extraction running for the current selection.
    Extracting,
    /// Conversion request in flight. Held strictly between submission start
    /// and settlement, on every exit path.
    Converting,
    /// Last conversion completed; selection was cleared.
    Succeeded,
    /// Last conversion failed; carries the human-readable reason.
    /// The selection is retained so the user can resubmit.
    Failed(String),
}

impl SessionState {
    /// The user-facing status line for this state, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            SessionState::Succeeded => Some("File Converted Successfully".to_string()),
            SessionState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

/// Receives session events as the workflow progresses.
///
/// Implementations must be `Send + Sync`; metadata extraction completes on a
/// different task than the one driving the conversion. All methods have
/// default no-op implementations so callers only override what they care
/// about. The CLI uses this to drive its spinner; library embedders can
/// forward events to channels or UI frameworks.
pub trait SessionObserver: Send + Sync {
    /// Called after every state transition.
    fn on_state_change(&self, state: &SessionState) {
        let _ = state;
    }

    /// Called when fresh metadata for the current selection is available.
    fn on_metadata(&self, metadata: &FileMetadata) {
        let _ = metadata;
    }
}

/// A no-op implementation for callers that don't need session events.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// One user's conversion workflow: the current selection, its derived
/// metadata, and the workflow state.
pub struct Session {
    selected: Option<SelectedFile>,
    metadata: Option<FileMetadata>,
    state: SessionState,
    generation: u64,
    observer: Option<Arc<dyn SessionObserver>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an idle session with no selection.
    pub fn new() -> Self {
        Self {
            selected: None,
            metadata: None,
            state: SessionState::Idle,
            generation: 0,
            observer: None,
        }
    }

    /// Create a session that reports events to `observer`.
    pub fn with_observer(observer: Arc<dyn SessionObserver>) -> Self {
        Self {
            observer: Some(observer),
            ..Self::new()
        }
    }

    /// Replace the current selection wholesale.
    ///
    /// Previous metadata is discarded immediately (it described the old
    /// file). Returns the new generation; pass it back to
    /// [`apply_metadata`](Self::apply_metadata) when extraction completes.
    pub fn select(&mut self, file: SelectedFile) -> u64 {
        self.generation += 1;
        debug!(
            generation = self.generation,
            name = %file.name,
            "file selected"
        );
        self.selected = Some(file);
        self.metadata = None;
        self.set_state(SessionState::Extracting);
        self.generation
    }

    /// Apply an extraction result, unless it is stale.
    ///
    /// Returns `true` if the metadata was accepted. A result tagged with an
    /// older generation is discarded: the user has selected a different file
    /// since that extraction started.
    pub fn apply_metadata(&mut self, generation: u64, metadata: FileMetadata) -> bool {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "discarding stale metadata"
            );
            return false;
        }
        if let Some(ref observer) = self.observer {
            observer.on_metadata(&metadata);
        }
        self.metadata = Some(metadata);
        if self.state == SessionState::Extracting {
            self.set_state(SessionState::Idle);
        }
        true
    }

    /// Record a failed extraction. Non-fatal: logged, previous metadata (if
    /// any) stays on display, and the workflow continues.
    pub fn extraction_failed(&mut self, generation: u64, error: &ExtractError) {
        warn!(generation, %error, "metadata extraction failed");
        if generation == self.generation && self.state == SessionState::Extracting {
            self.set_state(SessionState::Idle);
        }
    }

    /// Enter the converting state and hand back the file to submit.
    ///
    /// Refused when nothing is selected or a conversion is already in
    /// flight; in both cases no network call must be made.
    pub fn begin_conversion(&mut self) -> Result<SelectedFile, Word2PdfError> {
        if self.state == SessionState::Converting {
            return Err(Word2PdfError::ConversionInFlight);
        }
        match self.selected.clone() {
            Some(file) => {
                self.set_state(SessionState::Converting);
                Ok(file)
            }
            None => Err(Word2PdfError::NoFileSelected),
        }
    }

    /// Settle a successful conversion: clear the selection, keep the
    /// metadata on display.
    pub fn finish_success(&mut self) {
        self.selected = None;
        self.set_state(SessionState::Succeeded);
    }

    /// Settle a failed conversion. The selection is retained for resubmission.
    pub fn finish_failure(&mut self, error: &Word2PdfError) {
        self.set_state(SessionState::Failed(error.to_string()));
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn metadata(&self) -> Option<&FileMetadata> {
        self.metadata.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_converting(&self) -> bool {
        self.state == SessionState::Converting
    }

    fn set_state(&mut self, state: SessionState) {
        debug!(from = ?self.state, to = ?state, "session transition");
        self.state = state;
        if let Some(ref observer) = self.observer {
            observer.on_state_change(&self.state);
        }
    }
}
