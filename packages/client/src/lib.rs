//! # reqflow client
//!
//! The HTTP plumbing beneath the `reqflow` request builder: request and
//! response types, query/header accumulators, URL assembly, body producers,
//! response handlers and pluggable transports.
//!
//! ## Features
//!
//! - **Pluggable transports**: anything implementing [`Transport`], including
//!   closures, replayed raw responses and request-rewriting wrappers
//! - **Blocking network transport** over `reqwest` with rustls
//! - **Response handlers** that validate or consume a response, composable with
//!   [`chain_handlers`]
//! - **Tagged errors** recording which pipeline stage failed
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use http::Method;
//! use reqflow_client::{Client, Request, replay_string};
//!
//! let client = Client::from_transport(Arc::new(replay_string("HTTP/1.1 200 OK\r\n\r\nhello")));
//! let mut req = Request::new(Method::GET, "https://example.com/".parse().unwrap());
//! let mut res = client.execute(&mut req).unwrap();
//! assert_eq!(res.body_mut().read_to_vec().unwrap(), b"hello");
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

use std::sync::OnceLock;

pub mod body;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod transport;

pub use crate::client::Client;
pub use crate::config::{ClientConfig, ConfigurationError, Validator};
pub use crate::error::{BoxError, Error, Kind, Result};
pub use crate::handler::{Handler, ResponseHandler, chain_handlers};
pub use crate::http::{BodyGetter, BodyReader, KeyValue, Multimap, Request, Response, ResponseBody, blank_url};
pub use crate::transport::{
    ReplayTransport, ReqwestTransport, Transport, UserAgentTransport, WrapTransport, replay_string,
    wrap_client,
};

/// Global HTTP client instance
/// Built from `ClientConfig::default()` on first use unless
/// [`init_global_client`] installed a custom one earlier.
static GLOBAL_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get the global HTTP client instance
///
/// Cloning a [`Client`] only bumps a reference count, so every caller shares
/// the same connection pool.
pub fn global_client() -> Client {
    GLOBAL_CLIENT.get_or_init(Client::default).clone()
}

/// Initialize the global HTTP client with custom configuration
///
/// # Errors
///
/// Returns a validation error for an invalid `config`, or
/// `ConfigurationError::AlreadyInitialized` if the global client was already
/// built (explicitly or by a call to [`global_client`]).
pub fn init_global_client(config: ClientConfig) -> std::result::Result<(), ConfigurationError> {
    if let Err(e) = config.validate() {
        tracing::error!("Rejected global client configuration: {}", e);
        return Err(e);
    }

    GLOBAL_CLIENT
        .set(Client::new(&config))
        .map_err(|_| ConfigurationError::AlreadyInitialized)
}
