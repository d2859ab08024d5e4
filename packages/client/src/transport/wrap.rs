//! Request-rewriting transport wrappers

use std::fmt;
use std::sync::Arc;

use http::header::{HeaderValue, InvalidHeaderValue, USER_AGENT};

use super::Transport;
use crate::client::Client;
use crate::error::BoxError;
use crate::http::request::Request;
use crate::http::response::Response;

type RequestHook = Arc<dyn Fn(&mut Request) + Send + Sync>;

/// Passes a fork of every request through a hook before delegating.
///
/// The caller's request keeps its own head, so the hook's edits never leak back.
#[derive(Clone)]
pub struct WrapTransport {
    inner: Arc<dyn Transport>,
    hook: RequestHook,
}

impl WrapTransport {
    /// Wrap `inner`, running `hook` on each forked request.
    pub fn new<F>(inner: Arc<dyn Transport>, hook: F) -> Self
    where
        F: Fn(&mut Request) + Send + Sync + 'static,
    {
        Self {
            inner,
            hook: Arc::new(hook),
        }
    }
}

impl Transport for WrapTransport {
    fn round_trip(&self, req: &mut Request) -> Result<Response, BoxError> {
        let mut forked = req.fork();
        (self.hook)(&mut forked);
        self.inner.round_trip(&mut forked)
    }
}

impl fmt::Debug for WrapTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapTransport").finish_non_exhaustive()
    }
}

/// Return a copy of `client` whose transport runs `hook` on each forked request.
///
/// # Examples
/// ```
/// use reqflow_client::{Client, wrap_client};
///
/// let client = wrap_client(&Client::default(), |req| {
///     req.headers_mut().insert("x-trace", "on".parse().unwrap());
/// });
/// # let _ = client;
/// ```
pub fn wrap_client<F>(client: &Client, hook: F) -> Client
where
    F: Fn(&mut Request) + Send + Sync + 'static,
{
    client.with_transport(Arc::new(WrapTransport::new(client.transport(), hook)))
}

/// Sets `User-Agent` on a fork of every request before delegating.
#[derive(Clone)]
pub struct UserAgentTransport {
    inner: Arc<dyn Transport>,
    user_agent: HeaderValue,
}

impl UserAgentTransport {
    /// Wrap `inner`, sending `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if `user_agent` is not a valid header value.
    pub fn new(inner: Arc<dyn Transport>, user_agent: &str) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            inner,
            user_agent: HeaderValue::from_str(user_agent)?,
        })
    }
}

impl Transport for UserAgentTransport {
    fn round_trip(&self, req: &mut Request) -> Result<Response, BoxError> {
        let mut forked = req.fork();
        forked.headers_mut().insert(USER_AGENT, self.user_agent.clone());
        self.inner.round_trip(&mut forked)
    }
}

impl fmt::Debug for UserAgentTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAgentTransport")
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}
