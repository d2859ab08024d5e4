use super::BoxError;
use super::types::{Error, Kind};

/// Creates an `Error` for a URL-resolution failure.
pub fn url<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Url).with(e.into())
}

/// Creates an `Error` for a request-construction failure.
pub fn request<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Request).with(e.into())
}

/// Creates an `Error` for a transport failure.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for a rejected response.
pub fn validator<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Validator).with(e.into())
}

/// Creates an `Error` for a failed terminal handler.
pub fn handler<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Handler).with(e.into())
}

/// Creates an `Error` of the given kind wrapping `e`.
pub fn tagged<E: Into<BoxError>>(kind: Kind, e: E) -> Error {
    Error::new(kind).with(e.into())
}
