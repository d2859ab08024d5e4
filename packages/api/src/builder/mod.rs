//! Request builder
//!
//! [`Builder`] accumulates URL, header, cookie, body and pipeline
//! configuration, then resolves it into a request and sends it.

pub mod auth;
pub mod body;
pub mod core;
pub mod execute;
pub mod headers;
pub mod intercept;
pub mod methods;
pub mod pipeline;
pub mod resolve;
pub mod url_config;

pub use self::core::{Builder, ContentType};
pub use self::headers::header;
pub use self::intercept::{ErrorContext, ErrorHandler};
