//! Transports
//!
//! A transport performs one round trip: it sends a request and returns the
//! response head with a streaming body. Everything above it (URL resolution,
//! validation, handling) is transport-agnostic.

use crate::error::BoxError;
use crate::http::request::Request;
use crate::http::response::Response;

pub mod blocking;
pub mod replay;
pub mod wrap;

pub use self::blocking::ReqwestTransport;
pub use self::replay::{ReplayTransport, replay_string};
pub use self::wrap::{UserAgentTransport, WrapTransport, wrap_client};

/// A single request/response exchange.
///
/// The request is passed mutably so a transport can take its body stream.
/// Closures with the matching signature are transports too, which keeps
/// test doubles short:
///
/// ```
/// use http::{HeaderMap, StatusCode};
/// use reqflow_client::{BoxError, Request, Response, Transport};
///
/// let teapot = |_req: &mut Request| -> Result<Response, BoxError> {
///     Ok(Response::new(StatusCode::IM_A_TEAPOT, HeaderMap::new(), std::io::empty()))
/// };
/// # fn assert_transport<T: Transport>(_: &T) {}
/// # assert_transport(&teapot);
/// ```
pub trait Transport: Send + Sync {
    /// Send `req` and return the response.
    ///
    /// # Errors
    ///
    /// Returns any failure to obtain a response. Non-2xx statuses are not errors here.
    fn round_trip(&self, req: &mut Request) -> Result<Response, BoxError>;
}

impl<F> Transport for F
where
    F: Fn(&mut Request) -> Result<Response, BoxError> + Send + Sync,
{
    fn round_trip(&self, req: &mut Request) -> Result<Response, BoxError> {
        self(req)
    }
}
