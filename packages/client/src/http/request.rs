//! Outbound request type
//!
//! A `Request` owns the resolved method, URL and headers, the pending body
//! stream, and the body producer that created it so a transport can
//! re-materialize the body for another attempt.

use std::fmt;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, Method};
use url::Url;

use crate::error::BoxError;
use crate::http::headers::request_cookies;
use crate::http::multimap::KeyValue;

/// A readable request or response body stream.
pub type BodyReader = Box<dyn Read + Send + 'static>;

/// Produces a fresh request body stream on every call.
pub type BodyGetter = Arc<dyn Fn() -> Result<BodyReader, BoxError> + Send + Sync + 'static>;

/// HTTP request ready to be handed to a transport.
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<BodyReader>,
    get_body: Option<BodyGetter>,
    timeout: Option<Duration>,
}

impl Request {
    /// Create a request without a body.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            get_body: None,
            timeout: None,
        }
    }

    /// Attach the initial body stream and the producer able to recreate it.
    #[must_use]
    pub fn with_body(mut self, body: BodyReader, get_body: Option<BodyGetter>) -> Self {
        self.body = Some(body);
        self.get_body = get_body;
        self
    }

    /// Set the deadline for the exchange; transports honor it as a total timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Cookies carried by the request, in the order they were added.
    #[must_use]
    pub fn cookies(&self) -> Vec<KeyValue> {
        request_cookies(&self.headers)
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// Whether the request was built with a body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.body.is_some() || self.get_body.is_some()
    }

    /// The producer that can recreate the body, if any.
    #[must_use]
    pub fn get_body(&self) -> Option<&BodyGetter> {
        self.get_body.as_ref()
    }

    /// Take the pending body stream, leaving `None` behind.
    pub fn take_body(&mut self) -> Option<BodyReader> {
        self.body.take()
    }

    /// Take the pending body stream, or produce a fresh one if it was already taken.
    ///
    /// # Errors
    ///
    /// Returns the body producer's error.
    pub fn body_stream(&mut self) -> Result<Option<BodyReader>, BoxError> {
        if let Some(body) = self.body.take() {
            return Ok(Some(body));
        }
        match &self.get_body {
            Some(get_body) => get_body().map(Some),
            None => Ok(None),
        }
    }

    /// Copy the request head and move the pending body into the copy.
    ///
    /// The copy shares the body producer, so the original can still
    /// recreate its body after the fork has consumed the stream.
    pub fn fork(&mut self) -> Request {
        Request {
            method: self.method.clone(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.take(),
            get_body: self.get_body.clone(),
            timeout: self.timeout,
        }
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &self.headers)
            .field("body", &self.body.is_some())
            .field("get_body", &self.get_body.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}
