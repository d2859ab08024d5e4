//! Response pipeline configuration
//!
//! Validators run first, in registration order, and the first failure stops
//! the pipeline. The terminal handler runs only if every validator passed.
//! With no validators registered, any 2xx status passes; with no handler,
//! the body is drained and discarded.

use std::io::Write;
use std::sync::{Arc, Mutex};

use http::{HeaderMap, StatusCode};
use reqflow_client::handler::{self, Handler};
use reqflow_client::{BoxError, Client, Transport};
use serde::de::DeserializeOwned;

use crate::builder::core::Builder;

impl Builder {
    /// Register a validator.
    ///
    /// Registering any validator replaces the default 2xx check.
    ///
    /// # Examples
    /// ```
    /// use reqflow_client::handler::from_fn;
    ///
    /// let b = reqflow::url("https://example.com").add_validator(from_fn(|res| {
    ///     if res.headers().contains_key("x-ok") {
    ///         Ok(())
    ///     } else {
    ///         Err("missing x-ok".into())
    ///     }
    /// }));
    /// # let _ = b;
    /// ```
    #[must_use]
    pub fn add_validator(mut self, validator: Handler) -> Self {
        self.validators.push(validator);
        self
    }

    /// Accept only the listed statuses.
    #[must_use]
    pub fn check_status<I>(self, accepted: I) -> Self
    where
        I: IntoIterator<Item = StatusCode>,
    {
        self.add_validator(handler::check_status(accepted))
    }

    /// Accept only the listed media types, ignoring parameters such as `charset`.
    #[must_use]
    pub fn check_content_type<I, S>(self, accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_validator(handler::check_content_type(accepted))
    }

    /// Copy the response headers into `sink`.
    #[must_use]
    pub fn copy_headers(self, sink: Arc<Mutex<HeaderMap>>) -> Self {
        self.add_validator(handler::copy_headers(sink))
    }

    /// Inspect the first `n` body bytes without consuming them.
    #[must_use]
    pub fn peek<F>(self, n: usize, inspect: F) -> Self
    where
        F: Fn(&[u8]) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.add_validator(handler::peek(n, inspect))
    }

    /// Set the terminal handler, replacing any previous one.
    #[must_use]
    pub fn handle(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Store the body as a UTF-8 string in `sink`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::{Arc, Mutex};
    ///
    /// let body = Arc::new(Mutex::new(String::new()));
    /// reqflow::url("https://example.com")
    ///     .transport(reqflow_client::replay_string("HTTP/1.1 200 OK\r\n\r\nhello"))
    ///     .to_string(Arc::clone(&body))
    ///     .fetch()
    ///     .unwrap();
    /// assert_eq!(*body.lock().unwrap(), "hello");
    /// ```
    #[must_use]
    pub fn to_string(self, sink: Arc<Mutex<String>>) -> Self {
        self.handle(handler::to_string(sink))
    }

    /// Append the body to `sink`.
    #[must_use]
    pub fn to_bytes(self, sink: Arc<Mutex<Vec<u8>>>) -> Self {
        self.handle(handler::to_bytes(sink))
    }

    /// Decode the body as JSON into `sink`.
    #[must_use]
    pub fn to_json<T>(self, sink: Arc<Mutex<T>>) -> Self
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.handle(handler::to_json(sink))
    }

    /// Copy the body into `writer`.
    #[must_use]
    pub fn to_writer<W>(self, writer: Arc<Mutex<W>>) -> Self
    where
        W: Write + Send + 'static,
    {
        self.handle(handler::to_writer(writer))
    }

    /// Send through `client` instead of the process-wide default.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Send through `transport`, keeping the rest of the client's settings.
    #[must_use]
    pub fn transport<T>(mut self, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        self.transport = Some(Arc::new(transport));
        self
    }
}
