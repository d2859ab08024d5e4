//! Error interception
//!
//! Every failure, whatever stage it came from, is tagged with its [`Kind`]
//! and offered to the registered interceptors before it reaches the caller.
//! Interceptors run newest first and may replace or clear the error.

use std::fmt;
use std::sync::Arc;

use reqflow_client::error::tagged;
use reqflow_client::{BoxError, Error, Kind, Request, Response};

use crate::builder::core::Builder;

/// What an interceptor sees.
pub struct ErrorContext<'a> {
    /// The current error. Replace it to change what the caller sees, or set
    /// it to `None` to report success.
    pub error: Option<Error>,
    /// The request, if one was built.
    pub request: Option<&'a Request>,
    /// The response, if one was received.
    pub response: Option<&'a Response>,
    /// The stage that failed.
    pub kind: Kind,
    /// The builder that issued the request.
    pub builder: &'a Builder,
}

impl ErrorContext<'_> {
    /// Whether the original failure came from `kind`.
    #[must_use]
    pub fn is(&self, kind: Kind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for ErrorContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorContext")
            .field("error", &self.error)
            .field("request", &self.request.map(|r| r.url().as_str()))
            .field("response", &self.response.map(Response::status))
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Shared error interceptor.
pub type ErrorHandler = Arc<dyn Fn(&mut ErrorContext<'_>) + Send + Sync>;

impl Builder {
    /// Register an error interceptor.
    ///
    /// Interceptors run in reverse registration order, each seeing the error
    /// left by the one before it.
    ///
    /// # Examples
    /// ```
    /// use reqflow::Kind;
    ///
    /// let u = reqflow::url("http://[::1")
    ///     .on_error(|ctx| {
    ///         if ctx.is(Kind::Url) {
    ///             ctx.error = None;
    ///         }
    ///     })
    ///     .url()
    ///     .unwrap();
    /// assert_eq!(u.as_str(), "about:blank");
    /// ```
    #[must_use]
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ErrorContext<'_>) + Send + Sync + 'static,
    {
        self.error_handlers.push(Arc::new(f));
        self
    }

    /// Tag `err` with `kind` and run it through the interceptors.
    ///
    /// Returns `Ok(())` when an interceptor cleared the error.
    pub(crate) fn intercept(
        &self,
        kind: Kind,
        err: impl Into<BoxError>,
        request: Option<&Request>,
        response: Option<&Response>,
    ) -> Result<(), Error> {
        let mut error = tagged(kind, err);
        if let Some(req) = request {
            error = error.with_url(req.url().clone());
        }
        if self.error_handlers.is_empty() {
            return Err(error);
        }

        let mut ctx = ErrorContext {
            error: Some(error),
            request,
            response,
            kind,
            builder: self,
        };
        for handler in self.error_handlers.iter().rev() {
            handler(&mut ctx);
        }

        match ctx.error {
            Some(error) => Err(error),
            None => {
                log::trace!("{} error cleared by interceptor", kind);
                Ok(())
            }
        }
    }
}
