//! Core `Builder` structure and base functionality
//!
//! Contains the `Builder` struct with its accumulators, construction,
//! read-only accessors and the small amount of shared state handling the
//! other builder modules build on.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqflow_client::{BodyGetter, Client, Handler, KeyValue, Multimap, Transport};

use crate::builder::intercept::ErrorHandler;

/// Content type enumeration for the common media types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// application/json content type
    ApplicationJson,
    /// application/x-www-form-urlencoded content type
    ApplicationFormUrlEncoded,
    /// application/octet-stream content type
    ApplicationOctetStream,
    /// text/plain content type
    TextPlain,
    /// text/html content type
    TextHtml,
}

impl ContentType {
    /// Convert content type to string representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::ApplicationJson => "application/json",
            ContentType::ApplicationFormUrlEncoded => "application/x-www-form-urlencoded",
            ContentType::ApplicationOctetStream => "application/octet-stream",
            ContentType::TextPlain => "text/plain",
            ContentType::TextHtml => "text/html",
        }
    }
}

impl From<ContentType> for String {
    fn from(ct: ContentType) -> Self {
        ct.as_str().to_string()
    }
}

/// Fluent request builder
///
/// Configuration methods take `self` and return it, appending to ordered
/// accumulators. Nothing is resolved until [`url`](Builder::url),
/// [`request`](Builder::request), [`send`](Builder::send) or
/// [`fetch`](Builder::fetch) is called, and those never modify the builder.
///
/// Cloning copies every accumulator, so two clones can be extended
/// independently:
///
/// ```
/// let base = reqflow::url("https://example.com/api").param("v", ["1"]);
/// let users = base.clone().path("users");
/// let groups = base.path("groups");
///
/// assert_eq!(users.url().unwrap().as_str(), "https://example.com/api/users?v=1");
/// assert_eq!(groups.url().unwrap().as_str(), "https://example.com/api/groups?v=1");
/// ```
#[derive(Clone, Default)]
pub struct Builder {
    pub(crate) base_url: String,
    pub(crate) scheme: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) paths: Vec<String>,
    pub(crate) params: Vec<Multimap>,
    pub(crate) headers: Vec<Multimap>,
    pub(crate) cookies: Vec<KeyValue>,
    pub(crate) get_body: Option<BodyGetter>,
    pub(crate) method: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) client: Option<Client>,
    pub(crate) transport: Option<Arc<dyn Transport>>,
    pub(crate) validators: Vec<Handler>,
    pub(crate) handler: Option<Handler>,
    pub(crate) error_handlers: Vec<ErrorHandler>,
    /// Debug logging enabled flag
    pub(crate) debug_enabled: bool,
}

impl Builder {
    /// Start building a request against `base`.
    ///
    /// The base may omit its scheme (`example.com/x` resolves as
    /// `https://example.com/x`) and may be empty if a host is set later.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base_url: base.into(),
            ..Self::default()
        }
    }

    /// Enable debug logging of dispatched requests and their outcome
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Set the deadline for each request built from this builder
    ///
    /// Without one, the client's configured default applies.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Apply a reusable configuration bundle.
    ///
    /// # Examples
    /// ```
    /// use reqflow::Builder;
    ///
    /// fn github(b: Builder) -> Builder {
    ///     b.host("api.github.com").accept("application/vnd.github+json")
    /// }
    ///
    /// let b = reqflow::url("").config(github).path("/repos");
    /// assert_eq!(b.url().unwrap().as_str(), "https://api.github.com/repos");
    /// ```
    #[must_use]
    pub fn config<F>(self, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        f(self)
    }

    /// The base URL as given.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path fragments in call order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Query overrides in call order.
    #[must_use]
    pub fn params(&self) -> &[Multimap] {
        &self.params
    }

    /// Header overrides in call order.
    #[must_use]
    pub fn header_overrides(&self) -> &[Multimap] {
        &self.headers
    }

    /// Cookies in call order.
    #[must_use]
    pub fn cookies(&self) -> &[KeyValue] {
        &self.cookies
    }

    /// Whether a body producer is set.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.get_body.is_some()
    }

    /// The method that will be used: the override if set, else `POST` when a
    /// body is set and `GET` otherwise.
    #[must_use]
    pub fn method_name(&self) -> &str {
        match self.method.as_deref() {
            Some(method) if !method.is_empty() => method,
            _ if self.get_body.is_some() => "POST",
            _ => "GET",
        }
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("base_url", &self.base_url)
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("paths", &self.paths)
            .field("params", &self.params)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .field("body", &self.get_body.is_some())
            .field("method", &self.method)
            .field("timeout", &self.timeout)
            .field("client", &self.client)
            .field("transport", &self.transport.is_some())
            .field("validators", &self.validators.len())
            .field("handler", &self.handler.is_some())
            .field("error_handlers", &self.error_handlers.len())
            .field("debug_enabled", &self.debug_enabled)
            .finish()
    }
}
