//! Configuration types for the conversion client.
//!
//! All workflow behaviour is controlled through [`ClientConfig`], built via
//! its [`ClientConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config between the metadata and submission paths and
//! to diff two runs to understand why their outcomes differ.
//!
//! # Design choice: builder over constructor
//! The struct will keep growing (timeouts, output placement, injected
//! extractor). The builder lets callers set only what they care about and
//! rely on well-documented defaults for the rest.

use crate::error::Word2PdfError;
use crate::pipeline::extract::TextExtractor;
use crate::session::SessionObserver;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default conversion endpoint, matching the service's development address.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/convertFile";

/// Multipart field name the conversion service expects the document under.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Configuration for a Word-to-PDF conversion workflow.
///
/// Built via [`ClientConfig::builder()`] or using
/// [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use word2pdf::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .endpoint("http://converter.internal:3000/convertFile")
///     .request_timeout_secs(60)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// URL of the conversion endpoint. Default: [`DEFAULT_ENDPOINT`].
    ///
    /// The service contract is fixed: one multipart POST with the document
    /// under the `file` field, HTTP 200 with PDF bytes on success, HTTP 400
    /// with a JSON `{ "message": … }` body on rejection.
    pub endpoint: String,

    /// Multipart field name for the uploaded document. Default: `"file"`.
    ///
    /// Only useful against a service deployed with a non-standard field
    /// name; the reference deployment always uses `file`.
    pub field_name: String,

    /// Whole-request timeout in seconds. Default: 120.
    ///
    /// Covers upload, server-side conversion, and download of the PDF body.
    /// Large documents convert slowly, so this is deliberately generous.
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds. Default: 10.
    ///
    /// Separate from the request timeout so an unreachable host fails fast
    /// instead of burning the full conversion budget.
    pub connect_timeout_secs: u64,

    /// Directory the converted PDF is written to.
    /// If `None`, the PDF lands next to the input file.
    pub output_dir: Option<PathBuf>,

    /// Skip metadata extraction entirely. Default: false.
    ///
    /// Extraction is concurrent with submission and its failures are
    /// non-fatal, so skipping it only saves the archive parse.
    pub skip_metadata: bool,

    /// Submit files whose magic bytes are not recognised as Word documents.
    /// Default: false.
    ///
    /// The service rejects unconvertible uploads with HTTP 400 anyway; this
    /// flag defers validation to it instead of failing locally.
    pub force: bool,

    /// Text extractor used for the word count. If `None`, the built-in
    /// docx extractor is used. Injectable so tests can substitute a canned
    /// extractor.
    pub extractor: Option<Arc<dyn TextExtractor>>,

    /// Observer receiving session state transitions and metadata updates.
    pub observer: Option<Arc<dyn SessionObserver>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: UPLOAD_FIELD_NAME.to_string(),
            request_timeout_secs: 120,
            connect_timeout_secs: 10,
            output_dir: None,
            skip_metadata: false,
            force: false,
            extractor: None,
            observer: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("field_name", &self.field_name)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("output_dir", &self.output_dir)
            .field("skip_metadata", &self.skip_metadata)
            .field("force", &self.force)
            .field("extractor", &self.extractor.as_ref().map(|_| "<dyn TextExtractor>"))
            .field("observer", &self.observer.as_ref().map(|_| "<dyn SessionObserver>"))
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.config.field_name = name.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = secs.max(1);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    pub fn skip_metadata(mut self, v: bool) -> Self {
        self.config.skip_metadata = v;
        self
    }

    pub fn force(mut self, v: bool) -> Self {
        self.config.force = v;
        self
    }

    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.config.extractor = Some(extractor);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, Word2PdfError> {
        let c = &self.config;
        if !c.endpoint.starts_with("http://") && !c.endpoint.starts_with("https://") {
            return Err(Word2PdfError::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got '{}'",
                c.endpoint
            )));
        }
        if c.field_name.is_empty() {
            return Err(Word2PdfError::InvalidConfig(
                "multipart field name must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
