//! # reqflow
//!
//! Fluent request construction and response handling.
//!
//! A [`Builder`] declaratively collects a URL, method, headers, cookies and a
//! body, then sends the request and pipes the response through validators
//! and a single terminal handler. Every failure is tagged with the stage that
//! produced it and can be rewritten by error interceptors.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use reqflow_client::replay_string;
//!
//! let body = Arc::new(Mutex::new(String::new()));
//! reqflow::url("https://example.com/api")
//!     .path("greeting")
//!     .param("lang", ["en"])
//!     .transport(replay_string("HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello"))
//!     .check_content_type(["text/plain"])
//!     .to_string(Arc::clone(&body))
//!     .fetch()
//!     .unwrap();
//!
//! assert_eq!(*body.lock().unwrap(), "hello");
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::{Builder, ContentType, ErrorContext, ErrorHandler, header};

// Re-export important types from client package
pub use reqflow_client::{
    BoxError, Client, ClientConfig, Error, Handler, Kind, Request, Response, ResponseHandler,
    Transport, global_client, init_global_client,
};

/// Start building a request against `base`.
///
/// Shorthand for [`Builder::new`].
#[must_use]
pub fn url(base: impl Into<String>) -> Builder {
    Builder::new(base)
}
