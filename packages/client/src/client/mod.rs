//! Client handle
//!
//! A [`Client`] is a cheap-to-clone handle around a shared [`Transport`] and a
//! default request deadline. The process-wide default lives in the crate root
//! ([`global_client`](crate::global_client)).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::BoxError;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::transport::{ReqwestTransport, Transport};

/// Shared HTTP client handle.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    timeout: Option<Duration>,
}

impl Client {
    /// Create a network client from `config`.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::new(config)),
            timeout: config.timeout,
        }
    }

    /// Create a client that sends every request through `transport`.
    #[must_use]
    pub fn from_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            timeout: None,
        }
    }

    /// Return a copy of this client using `transport` instead.
    ///
    /// The default deadline is kept; the original client is unaffected.
    #[must_use]
    pub fn with_transport(&self, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            timeout: self.timeout,
        }
    }

    /// Set the deadline applied to requests that carry none.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// The default request deadline.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Send `req` and return the response head with its streaming body.
    ///
    /// A request without its own deadline gets the client's default.
    ///
    /// # Errors
    ///
    /// Returns the transport's failure unchanged.
    pub fn execute(&self, req: &mut Request) -> Result<Response, BoxError> {
        if req.timeout().is_none() {
            req.set_timeout(self.timeout);
        }
        tracing::debug!(method = %req.method(), url = %req.url(), "Dispatching request");

        match self.transport.round_trip(req) {
            Ok(res) => {
                tracing::debug!(status = %res.status(), "Request completed");
                Ok(res)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Request failed");
                Err(e)
            }
        }
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
