//! HTTP method selection
//!
//! Without an explicit method a request is sent as `GET`, or as `POST` when a
//! body is set.

use http::Method;

use crate::builder::core::Builder;

impl Builder {
    /// Set the request method.
    ///
    /// The name is parsed when the request is built, so a malformed token
    /// surfaces as a request error. An empty name restores method inference.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Use `GET`.
    #[must_use]
    pub fn get(self) -> Self {
        self.method(Method::GET.as_str())
    }

    /// Use `POST`.
    #[must_use]
    pub fn post(self) -> Self {
        self.method(Method::POST.as_str())
    }

    /// Use `PUT`.
    #[must_use]
    pub fn put(self) -> Self {
        self.method(Method::PUT.as_str())
    }

    /// Use `PATCH`.
    #[must_use]
    pub fn patch(self) -> Self {
        self.method(Method::PATCH.as_str())
    }

    /// Use `DELETE`.
    #[must_use]
    pub fn delete(self) -> Self {
        self.method(Method::DELETE.as_str())
    }

    /// Use `HEAD`.
    #[must_use]
    pub fn head(self) -> Self {
        self.method(Method::HEAD.as_str())
    }
}
