//! HTTP request/response model and resolution helpers
//!
//! This module provides the ordered accumulators a builder records its
//! configuration in, URL path/query resolution, header and cookie helpers,
//! and the outbound request and inbound response types.

pub mod headers;
pub mod multimap;
pub mod request;
pub mod response;
pub mod url;

pub use self::headers::*;
pub use self::multimap::*;
pub use self::request::*;
pub use self::response::*;
pub use self::url::*;
