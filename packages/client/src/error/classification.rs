use std::error::Error as StdError;
use std::io;

use super::helpers::StatusError;
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the URL could not be resolved.
    #[must_use]
    pub fn is_url(&self) -> bool {
        matches!(self.inner.kind, Kind::Url)
    }

    /// Returns true if the request could not be constructed.
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(self.inner.kind, Kind::Request)
    }

    /// Returns true if the transport failed.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.inner.kind, Kind::Connect)
    }

    /// Returns true if a validator rejected the response.
    #[must_use]
    pub fn is_validator(&self) -> bool {
        matches!(self.inner.kind, Kind::Validator)
    }

    /// Returns true if the terminal handler failed.
    #[must_use]
    pub fn is_handler(&self) -> bool {
        matches!(self.inner.kind, Kind::Handler)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            }
            if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
                if reqwest_err.is_timeout() {
                    return true;
                }
            }
            source = err.source();
        }

        false
    }

    /// Returns the status code, if the error came from a status validator.
    #[must_use]
    pub fn status(&self) -> Option<http::StatusCode> {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(status) = err.downcast_ref::<StatusError>() {
                return Some(status.status);
            }
            source = err.source();
        }

        None
    }
}
