//! Canned-response transport for tests

use std::fmt;
use std::io::Cursor;

use http::header::{CONTENT_LENGTH, HeaderName, HeaderValue, TRANSFER_ENCODING};
use http::{HeaderMap, Method, StatusCode, Version};

use super::Transport;
use crate::error::{BoxError, ReplayError};
use crate::http::request::Request;
use crate::http::response::Response;

/// Responds to every request with the same recorded raw HTTP/1.x response.
///
/// The raw text is re-parsed on each call, so every response gets its own body.
#[derive(Clone)]
pub struct ReplayTransport {
    raw: String,
}

impl ReplayTransport {
    /// Create a transport replaying `raw`.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Parse the recorded response.
    ///
    /// # Errors
    ///
    /// Returns a [`ReplayError`] when the status line or a header line is malformed,
    /// the header block is not terminated by a blank line, or a chunked body
    /// is badly framed.
    pub fn parse(&self) -> Result<Response, ReplayError> {
        parse_response(self.raw.as_bytes(), false)
    }
}

impl Transport for ReplayTransport {
    fn round_trip(&self, req: &mut Request) -> Result<Response, BoxError> {
        // The recorded body is all that is sent back; drop ours like a server would.
        drop(req.take_body());
        let head = *req.method() == Method::HEAD;
        let res = parse_response(self.raw.as_bytes(), head)?.with_url(req.url().clone());
        tracing::trace!(status = %res.status(), url = %req.url(), "Replayed recorded response");
        Ok(res)
    }
}

impl fmt::Debug for ReplayTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplayTransport")
            .field("len", &self.raw.len())
            .finish()
    }
}

/// Build a [`ReplayTransport`] from a raw response string.
///
/// # Examples
/// ```
/// let transport = reqflow_client::replay_string("HTTP/1.1 204 No Content\r\n\r\n");
/// # let _ = transport;
/// ```
pub fn replay_string(raw: impl Into<String>) -> ReplayTransport {
    ReplayTransport::new(raw)
}

/// Parse a raw response. `head` marks a reply to a `HEAD` request, which never has a body.
fn parse_response(raw: &[u8], head: bool) -> Result<Response, ReplayError> {
    let (head_end, body_start) = find_header_body_separator(raw).ok_or(ReplayError::MissingSeparator)?;
    let head_text = String::from_utf8_lossy(&raw[..head_end]);
    let mut lines = head_text.lines();

    let status_line = lines.next().unwrap_or_default();
    let (version, status) = parse_status_line(status_line)?;

    let mut headers = HeaderMap::new();
    for line in lines.filter(|line| !line.trim().is_empty()) {
        let (name, value) = parse_header_line(line)?;
        headers.append(name, value);
    }

    let payload = &raw[body_start..];
    let body = if head || is_bodiless(status) {
        Vec::new()
    } else if is_chunked(&headers) {
        headers.remove(TRANSFER_ENCODING);
        headers.remove(CONTENT_LENGTH);
        decode_chunked(payload)?
    } else {
        let mut body = payload.to_vec();
        if let Some(len) = content_length(&headers) {
            body.truncate(len);
        }
        body
    };

    Ok(Response::new(status, headers, Cursor::new(body)).with_version(version))
}

/// Position of the blank line ending the header block: `(head_end, body_start)`.
fn find_header_body_separator(data: &[u8]) -> Option<(usize, usize)> {
    let crlf = data.windows(4).position(|w| w == b"\r\n\r\n").map(|i| (i, i + 4));
    let lf = data.windows(2).position(|w| w == b"\n\n").map(|i| (i, i + 2));
    match (crlf, lf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn parse_status_line(line: &str) -> Result<(Version, StatusCode), ReplayError> {
    let malformed = || ReplayError::StatusLine(line.to_string());
    let mut parts = line.trim().splitn(3, ' ');

    let version = match parts.next() {
        Some("HTTP/1.0") => Version::HTTP_10,
        Some("HTTP/1.1") => Version::HTTP_11,
        Some("HTTP/2" | "HTTP/2.0") => Version::HTTP_2,
        _ => return Err(malformed()),
    };
    let status = parts
        .next()
        .and_then(|code| StatusCode::from_bytes(code.as_bytes()).ok())
        .ok_or_else(malformed)?;

    Ok((version, status))
}

fn parse_header_line(line: &str) -> Result<(HeaderName, HeaderValue), ReplayError> {
    let malformed = || ReplayError::HeaderLine(line.to_string());
    let (name, value) = line.split_once(':').ok_or_else(malformed)?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| malformed())?;
    let value = HeaderValue::from_str(value.trim()).map_err(|_| malformed())?;
    Ok((name, value))
}

fn is_bodiless(status: StatusCode) -> bool {
    status.is_informational() || status == StatusCode::NO_CONTENT || status == StatusCode::NOT_MODIFIED
}

/// Whether `chunked` is the final transfer coding.
fn is_chunked(headers: &HeaderMap) -> bool {
    headers
        .get_all(TRANSFER_ENCODING)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|coding| !coding.is_empty())
        .last()
        .is_some_and(|coding| coding.eq_ignore_ascii_case("chunked"))
}

/// Decode a `Transfer-Encoding: chunked` payload. Chunk extensions and
/// trailer fields are discarded.
fn decode_chunked(mut data: &[u8]) -> Result<Vec<u8>, ReplayError> {
    let mut body = Vec::new();
    loop {
        let line_end = data
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| ReplayError::Chunked("missing chunk size line".to_string()))?;
        let line = String::from_utf8_lossy(&data[..line_end]);
        let size_text = line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size_text, 16)
            .map_err(|_| ReplayError::Chunked(format!("invalid chunk size {size_text:?}")))?;
        data = &data[line_end + 1..];

        if size == 0 {
            return Ok(body);
        }
        if data.len() < size {
            return Err(ReplayError::Chunked(format!(
                "chunk of {size} bytes has only {} left",
                data.len()
            )));
        }
        body.extend_from_slice(&data[..size]);
        data = data
            .get(size..)
            .and_then(|rest| rest.strip_prefix(b"\r\n").or_else(|| rest.strip_prefix(b"\n")))
            .ok_or_else(|| ReplayError::Chunked(format!("chunk of {size} bytes is not followed by CRLF")))?;
    }
}

fn content_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
