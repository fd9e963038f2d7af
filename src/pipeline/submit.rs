//! Submission: the one multipart POST to the conversion service.
//!
//! The service contract is small and fixed:
//!
//! * request — `POST {endpoint}`, multipart body, document bytes under the
//!   `file` field with the original filename
//! * `200`   — body is the converted PDF
//! * `400`   — body is JSON `{ "message": string }` describing the rejection
//! * anything else — unspecified; normalised into [`Word2PdfError::Upstream`]
//!
//! Every way the call can go wrong maps to a distinct error variant with a
//! readable cause. There is deliberately no retry: the service performs one
//! real conversion per request, so a blind retry would double the work.

use crate::config::ClientConfig;
use crate::error::Word2PdfError;
use crate::pipeline::input::SelectedFile;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// PDF magic bytes expected at the start of a 200 response body.
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Cap on how much of an unexpected response body ends up in an error
/// message.
const BODY_SNIPPET_LEN: usize = 200;

/// JSON body of an HTTP 400 rejection.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    message: String,
}

/// Upload the selected file and return the converted PDF bytes.
///
/// Performs exactly one POST. Classification of the outcome:
///
/// * `Ok(bytes)` — HTTP 200 with a body starting in `%PDF`
/// * [`Word2PdfError::Rejected`] — HTTP 400 with a parseable `message`
/// * [`Word2PdfError::Upstream`] — any other status, or a 400 whose body
///   could not be parsed
/// * [`Word2PdfError::Timeout`] / [`Word2PdfError::Network`] — the request
///   never settled normally
/// * [`Word2PdfError::NotAPdfResponse`] — 200 with a non-PDF body
pub async fn submit(
    file: &SelectedFile,
    config: &ClientConfig,
) -> Result<Vec<u8>, Word2PdfError> {
    let bytes = tokio::fs::read(&file.path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Word2PdfError::FileNotFound {
            path: file.path.clone(),
        },
        std::io::ErrorKind::PermissionDenied => Word2PdfError::PermissionDenied {
            path: file.path.clone(),
        },
        _ => Word2PdfError::Internal(format!("reading '{}': {e}", file.path.display())),
    })?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .map_err(|e| Word2PdfError::Internal(format!("http client: {e}")))?;

    let part = Part::bytes(bytes)
        .file_name(file.name.clone())
        .mime_str(file.mime())
        .map_err(|e| Word2PdfError::Internal(format!("multipart part: {e}")))?;
    let form = Form::new().part(config.field_name.clone(), part);

    debug!(
        endpoint = %config.endpoint,
        name = %file.name,
        size = file.size,
        "submitting conversion request"
    );

    let response = client
        .post(&config.endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|e| classify_transport_error(e, config))?;

    let status = response.status();

    if status == StatusCode::BAD_REQUEST {
        let body = response.bytes().await.unwrap_or_default();
        if let Ok(rejection) = serde_json::from_slice::<RejectionBody>(&body) {
            info!(message = %rejection.message, "conversion rejected by service");
            return Err(Word2PdfError::Rejected {
                message: rejection.message,
            });
        }
        return Err(Word2PdfError::Upstream {
            status: 400,
            detail: body_snippet(&body),
        });
    }

    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        return Err(Word2PdfError::Upstream {
            status: status.as_u16(),
            detail: body_snippet(&body),
        });
    }

    let body = response.bytes().await.map_err(|e| Word2PdfError::Network {
        endpoint: config.endpoint.clone(),
        reason: format!("reading response body: {e}"),
    })?;

    if body.len() < 4 || &body[..4] != PDF_MAGIC {
        let mut magic = [0u8; 4];
        let n = body.len().min(4);
        magic[..n].copy_from_slice(&body[..n]);
        return Err(Word2PdfError::NotAPdfResponse { magic });
    }

    info!(pdf_bytes = body.len(), "conversion succeeded");
    Ok(body.to_vec())
}

/// Map a reqwest transport failure onto our taxonomy.
fn classify_transport_error(error: reqwest::Error, config: &ClientConfig) -> Word2PdfError {
    if error.is_timeout() {
        Word2PdfError::Timeout {
            endpoint: config.endpoint.clone(),
            secs: config.request_timeout_secs,
        }
    } else {
        Word2PdfError::Network {
            endpoint: config.endpoint.clone(),
            reason: error.to_string(),
        }
    }
}

/// First [`BODY_SNIPPET_LEN`] bytes of a body, lossily decoded, for error
/// messages.
fn body_snippet(body: &[u8]) -> String {
    let end = body
        .len()
        .min(BODY_SNIPPET_LEN)
        .min(floor_char_boundary_lossy(body, BODY_SNIPPET_LEN));
    String::from_utf8_lossy(&body[..end]).trim().to_string()
}

/// Largest index ≤ `at` that does not split a UTF-8 sequence mid-way.
fn floor_char_boundary_lossy(bytes: &[u8], at: usize) -> usize {
    if bytes.len() <= at {
        return bytes.len();
    }
    let mut i = at;
    while i > 0 && (bytes[i] & 0b1100_0000) == 0b1000_0000 {
        i -= 1;
    }
    i
}
