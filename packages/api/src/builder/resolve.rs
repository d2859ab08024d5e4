//! Resolution of the accumulated configuration
//!
//! Resolution only reads the builder. Every call re-derives the URL and the
//! request from scratch, so a builder can be resolved any number of times.

use http::Method;
use reqflow_client::http::{ResolveError, UrlParts, apply_cookies, apply_header_overrides};
use reqflow_client::{BoxError, Error, Kind, Request, blank_url};
use url::Url;

use crate::builder::core::Builder;

impl Builder {
    /// Resolve the URL.
    ///
    /// # Errors
    ///
    /// Returns a [`Kind::Url`] error when the base cannot be parsed or the
    /// result has no host. If an interceptor clears that error the blank
    /// placeholder `about:blank` is returned instead.
    ///
    /// # Examples
    /// ```
    /// let u = reqflow::url("example.com/api")
    ///     .path("v2")
    ///     .param("q", ["rust"])
    ///     .url()
    ///     .unwrap();
    /// assert_eq!(u.as_str(), "https://example.com/api/v2?q=rust");
    /// ```
    pub fn url(&self) -> Result<Url, Error> {
        match self.resolve_url() {
            Ok(url) => Ok(url),
            Err(e) => {
                self.intercept(Kind::Url, e, None, None)?;
                Ok(blank_url())
            }
        }
    }

    fn resolve_url(&self) -> Result<Url, ResolveError> {
        let mut parts = UrlParts::parse(&self.base_url)?;
        if let Some(scheme) = self.scheme.as_deref().filter(|s| !s.is_empty()) {
            parts.scheme = Some(scheme.to_string());
        }
        if let Some(host) = self.host.as_deref().filter(|h| !h.is_empty()) {
            parts.host = host.to_string();
        }
        for fragment in &self.paths {
            parts.push_path(fragment);
        }
        parts.apply_params(&self.params);
        parts.assemble()
    }

    /// Build the outbound request without sending it.
    ///
    /// Returns `Ok(None)` when construction failed and an interceptor cleared
    /// the error, since there is then no request to return.
    ///
    /// # Errors
    ///
    /// Returns a [`Kind::Url`] error as [`url`](Builder::url) does, or a
    /// [`Kind::Request`] error when the body producer fails, the method is
    /// not a valid token, or a header name or value is invalid.
    pub fn request(&self) -> Result<Option<Request>, Error> {
        let url = self.url()?;
        match self.build_request(url) {
            Ok(req) => Ok(Some(req)),
            Err(e) => {
                self.intercept(Kind::Request, e, None, None)?;
                Ok(None)
            }
        }
    }

    fn build_request(&self, url: Url) -> Result<Request, BoxError> {
        let body = match &self.get_body {
            Some(get_body) => Some(get_body()?),
            None => None,
        };
        let method = Method::from_bytes(self.method_name().as_bytes())?;

        let mut req = Request::new(method, url);
        if let Some(body) = body {
            req = req.with_body(body, self.get_body.clone());
        }
        if let Some(timeout) = self.timeout {
            req = req.with_timeout(timeout);
        }
        apply_header_overrides(req.headers_mut(), &self.headers)?;
        apply_cookies(req.headers_mut(), &self.cookies)?;
        Ok(req)
    }
}
