//! Client configuration
//!
//! [`ClientConfig`] holds the settings used to build the default network
//! transport; [`validation`] checks them before a process-wide client is
//! installed.

pub mod client;
pub mod validation;

pub use self::client::ClientConfig;
pub use self::validation::{ConfigDefaults, ConfigResult, ConfigValidator, ConfigurationError, Validator};
