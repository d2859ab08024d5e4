//! Default network transport over `reqwest::blocking`

use std::fmt;

use reqwest::blocking;
use reqwest::redirect::Policy;

use super::Transport;
use crate::config::ClientConfig;
use crate::error::BoxError;
use crate::http::request::Request;
use crate::http::response::Response;

/// Sends requests over the network with a pooled `reqwest` blocking client.
///
/// Connection pooling, TLS, proxies and redirects are all handled by `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport from `config`, falling back to reqwest's defaults if
    /// the configured client cannot be built.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        match Self::try_new(config) {
            Ok(transport) => transport,
            Err(e) => {
                tracing::warn!("Failed to build configured HTTP client: {}, using defaults", e);
                Self::from_client(blocking::Client::new())
            }
        }
    }

    /// Build a transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` builder error, e.g. when the TLS backend fails to initialize.
    pub fn try_new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = blocking::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self::from_client(client))
    }

    /// Use an already configured `reqwest` client.
    #[must_use]
    pub fn from_client(client: blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl Transport for ReqwestTransport {
    fn round_trip(&self, req: &mut Request) -> Result<Response, BoxError> {
        let mut outbound = self
            .client
            .request(req.method().clone(), req.url().clone())
            .headers(req.headers().clone());
        if let Some(timeout) = req.timeout() {
            outbound = outbound.timeout(timeout);
        }
        if let Some(body) = req.body_stream()? {
            outbound = outbound.body(blocking::Body::new(body));
        }

        let res = outbound.send()?;
        let status = res.status();
        let version = res.version();
        let headers = res.headers().clone();
        let url = res.url().clone();
        tracing::trace!(%status, %url, "Received response head");

        Ok(Response::new(status, headers, res)
            .with_version(version)
            .with_url(url))
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}
