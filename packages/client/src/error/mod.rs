pub mod classification;
pub mod constructors;
pub mod helpers;
pub mod types;

pub use self::constructors::*;
pub use self::helpers::{BodyConsumedError, ContentTypeError, ReplayError, StatusError};
pub use self::types::{Error, Inner, Kind, Result};

/// Boxed error accepted from transports, body producers and response handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
