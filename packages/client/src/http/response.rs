//! Inbound response type
//!
//! The body of a `Response` is a single-owner stream. It is released exactly
//! once: either explicitly through [`ResponseBody::close`] or when the
//! response is dropped.

use std::fmt;
use std::io::{self, Cursor, Read};

use http::{HeaderMap, StatusCode, Version};
use url::Url;

use crate::http::request::BodyReader;

/// HTTP response received from a transport.
pub struct Response {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    url: Option<Url>,
    body: ResponseBody,
}

impl Response {
    /// Create a response around a body stream.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            version: Version::HTTP_11,
            headers,
            url: None,
            body: ResponseBody::new(Box::new(body)),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Record the URL the response was ultimately served from.
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// The `Content-Type` header, if present and printable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    #[must_use]
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut ResponseBody {
        &mut self.body
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("url", &self.url.as_ref().map(Url::as_str))
            .field("body", &self.body)
            .finish()
    }
}

/// Response body stream with release-once semantics.
pub struct ResponseBody {
    reader: Option<BodyReader>,
}

impl ResponseBody {
    fn new(reader: BodyReader) -> Self {
        Self { reader: Some(reader) }
    }

    /// Release the underlying stream.
    ///
    /// Returns `true` the first time it is called and `false` afterwards.
    pub fn close(&mut self) -> bool {
        match self.reader.take() {
            Some(reader) => {
                drop(reader);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    /// Put already-read bytes back in front of the remaining stream.
    pub fn unread(&mut self, bytes: Vec<u8>) {
        if bytes.is_empty() {
            return;
        }
        if let Some(rest) = self.reader.take() {
            self.reader = Some(Box::new(Cursor::new(bytes).chain(rest)));
        }
    }

    /// Read the rest of the stream into memory.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the stream.
    pub fn read_to_vec(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Read at most `limit` bytes.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the stream.
    pub fn read_prefix(&mut self, limit: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(limit.min(8 * 1024));
        self.by_ref().take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Read and discard the rest of the stream, returning the number of bytes drained.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the stream.
    pub fn drain(&mut self) -> io::Result<u64> {
        io::copy(self, &mut io::sink())
    }
}

impl Read for ResponseBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reader.as_mut() {
            Some(reader) => reader.read(buf),
            None => Err(io::Error::other("response body already closed")),
        }
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_closed() { "<closed>" } else { "<stream>" })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountedReader {
        inner: Cursor<Vec<u8>>,
        releases: Arc<AtomicUsize>,
    }

    impl Read for CountedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for CountedReader {
        fn drop(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counted(body: &str) -> (Response, Arc<AtomicUsize>) {
        let releases = Arc::new(AtomicUsize::new(0));
        let reader = CountedReader {
            inner: Cursor::new(body.as_bytes().to_vec()),
            releases: Arc::clone(&releases),
        };
        (Response::new(StatusCode::OK, HeaderMap::new(), reader), releases)
    }

    #[test]
    fn close_releases_exactly_once() {
        let (mut res, releases) = counted("hello");
        assert!(res.body_mut().close());
        assert!(!res.body_mut().close());
        drop(res);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_an_open_body_releases_it() {
        let (res, releases) = counted("hello");
        drop(res);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unread_bytes_are_read_again() {
        let (mut res, releases) = counted("hello world");
        let prefix = res.body_mut().read_prefix(5).unwrap();
        assert_eq!(prefix, b"hello");
        res.body_mut().unread(prefix);
        assert_eq!(res.body_mut().read_to_vec().unwrap(), b"hello world");
        res.body_mut().close();
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reading_a_closed_body_fails() {
        let (mut res, _) = counted("x");
        res.body_mut().close();
        assert!(res.body_mut().read_to_vec().is_err());
    }
}
