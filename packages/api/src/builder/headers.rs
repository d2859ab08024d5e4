//! Header and cookie configuration
//!
//! Provides methods for setting request headers, including the common
//! `Accept`, `Cache-Control`, `Content-Type` and `User-Agent` shorthands,
//! and for adding cookies.

use reqflow_client::{KeyValue, Multimap};

use crate::builder::core::Builder;

/// Header constants for common HTTP headers
pub mod header {
    pub use http::header::*;
}

impl Builder {
    /// Set a header, replacing any values the name already had.
    ///
    /// Names are canonicalized when the request is built; an invalid name or
    /// value surfaces then as a request error. An empty value list removes the
    /// header.
    ///
    /// # Arguments
    /// * `key` - The header name
    /// * `values` - The values to send, in order
    ///
    /// # Returns
    /// `Self` for method chaining
    ///
    /// # Examples
    /// ```
    /// let req = reqflow::url("https://example.com")
    ///     .header("X-Trace", ["a", "b"])
    ///     .header("x-trace", ["c"])
    ///     .request()
    ///     .unwrap()
    ///     .unwrap();
    /// let values: Vec<&str> = req
    ///     .headers()
    ///     .get_all("x-trace")
    ///     .iter()
    ///     .map(|v| v.to_str().unwrap())
    ///     .collect();
    /// assert_eq!(values, ["c"]);
    /// ```
    #[must_use]
    pub fn header<K, I, V>(mut self, key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.headers.push(Multimap::new(key, values));
        self
    }

    /// Set the `Accept` header.
    #[must_use]
    pub fn accept(self, media_type: impl Into<String>) -> Self {
        self.header(header::ACCEPT.as_str(), [media_type.into()])
    }

    /// Set the `Cache-Control` header.
    #[must_use]
    pub fn cache_control(self, directive: impl Into<String>) -> Self {
        self.header(header::CACHE_CONTROL.as_str(), [directive.into()])
    }

    /// Set the `Content-Type` header.
    ///
    /// # Examples
    /// ```
    /// use reqflow::ContentType;
    ///
    /// let b = reqflow::url("https://example.com").content_type(ContentType::TextPlain);
    /// # let _ = b;
    /// ```
    #[must_use]
    pub fn content_type(self, media_type: impl Into<String>) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), [media_type.into()])
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
        self.header(header::USER_AGENT.as_str(), [user_agent.into()])
    }

    /// Add a cookie.
    ///
    /// Cookies never replace each other: every call adds one more, in order,
    /// even when the name repeats.
    #[must_use]
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push(KeyValue::new(name, value));
        self
    }
}
