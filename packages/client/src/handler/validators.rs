//! Built-in response validators

use std::sync::{Arc, Mutex, PoisonError};

use http::{HeaderMap, StatusCode};

use super::{Handler, STATUS_PREVIEW_LIMIT};
use crate::error::{BoxError, ContentTypeError, StatusError};
use crate::http::response::Response;

/// Build a `StatusError` for `res`, quoting the start of its body.
///
/// The quoted bytes are consumed from the body.
pub fn status_error(res: &mut Response) -> StatusError {
    let preview = match res.body_mut().read_prefix(STATUS_PREVIEW_LIMIT) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::debug!("Could not read body preview: {}", e);
            String::new()
        }
    };
    StatusError {
        status: res.status(),
        preview,
    }
}

/// Accept only the listed status codes.
pub fn check_status<I>(accepted: I) -> Handler
where
    I: IntoIterator<Item = StatusCode>,
{
    let accepted: Vec<StatusCode> = accepted.into_iter().collect();
    Arc::new(move |res: &mut Response| -> Result<(), BoxError> {
        if accepted.contains(&res.status()) {
            Ok(())
        } else {
            Err(Box::new(status_error(res)))
        }
    })
}

/// Accept only responses whose media type is one of `accepted`.
///
/// Parameters such as `charset` are ignored and comparison is case-insensitive.
pub fn check_content_type<I, S>(accepted: I) -> Handler
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let accepted: Vec<String> = accepted.into_iter().map(Into::into).collect();
    Arc::new(move |res: &mut Response| -> Result<(), BoxError> {
        let found = res.content_type().map(str::to_string);
        let media_type = found
            .as_deref()
            .and_then(|value| value.split(';').next())
            .map(str::trim);
        let matched = media_type
            .is_some_and(|mt| accepted.iter().any(|want| want.eq_ignore_ascii_case(mt)));
        if matched {
            Ok(())
        } else {
            Err(Box::new(ContentTypeError {
                found,
                expected: accepted.clone(),
            }))
        }
    })
}

/// Copy the response headers into `sink`, replacing its previous contents.
pub fn copy_headers(sink: Arc<Mutex<HeaderMap>>) -> Handler {
    Arc::new(move |res: &mut Response| -> Result<(), BoxError> {
        let mut headers = sink.lock().unwrap_or_else(PoisonError::into_inner);
        headers.clone_from(res.headers());
        Ok(())
    })
}

/// Pass up to the first `n` body bytes to `inspect` without consuming them.
pub fn peek<F>(n: usize, inspect: F) -> Handler
where
    F: Fn(&[u8]) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Arc::new(move |res: &mut Response| -> Result<(), BoxError> {
        let prefix = res.body_mut().read_prefix(n)?;
        let outcome = inspect(&prefix);
        res.body_mut().unread(prefix);
        outcome
    })
}
