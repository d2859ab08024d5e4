use http::StatusCode;
use thiserror::Error;

/// A response status that a status validator did not accept.
///
/// `preview` holds at most the first kilobyte of the body, decoded lossily.
#[derive(Debug, Clone, Error)]
#[error("unexpected status: {status}{}", preview_suffix(.preview))]
pub struct StatusError {
    pub status: StatusCode,
    pub preview: String,
}

fn preview_suffix(preview: &str) -> String {
    if preview.is_empty() {
        String::new()
    } else {
        format!(": {preview}")
    }
}

/// A response `Content-Type` outside the accepted set.
#[derive(Debug, Clone, Error)]
#[error("unexpected content type: {found:?} (expected one of {expected:?})")]
pub struct ContentTypeError {
    pub found: Option<String>,
    pub expected: Vec<String>,
}

/// A single-use request body producer was invoked more than once.
#[derive(Debug, Clone, Copy, Error)]
#[error("request body stream has already been consumed")]
pub struct BodyConsumedError;

/// A recorded raw response could not be parsed.
#[derive(Debug, Clone, Error)]
pub enum ReplayError {
    #[error("missing header/body separator in recorded response")]
    MissingSeparator,
    #[error("malformed status line: {0:?}")]
    StatusLine(String),
    #[error("malformed header line: {0:?}")]
    HeaderLine(String),
    #[error("malformed chunked body: {0}")]
    Chunked(String),
}
