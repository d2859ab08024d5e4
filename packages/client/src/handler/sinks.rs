//! Terminal handlers that store the response body
//!
//! Sinks are shared behind `Arc<Mutex<_>>` so the handler stays `Send + Sync`
//! and the caller can read the result after the request completes.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;

use super::Handler;
use crate::error::BoxError;
use crate::http::response::Response;

/// Read the body as UTF-8 into `sink`.
pub fn to_string(sink: Arc<Mutex<String>>) -> Handler {
    Arc::new(move |res: &mut Response| -> Result<(), BoxError> {
        let bytes = res.body_mut().read_to_vec()?;
        let text = String::from_utf8(bytes)?;
        *sink.lock().unwrap_or_else(PoisonError::into_inner) = text;
        Ok(())
    })
}

/// Append the body to `sink`.
pub fn to_bytes(sink: Arc<Mutex<Vec<u8>>>) -> Handler {
    Arc::new(move |res: &mut Response| -> Result<(), BoxError> {
        let bytes = res.body_mut().read_to_vec()?;
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(&bytes);
        Ok(())
    })
}

/// Decode the body as JSON into `sink`.
pub fn to_json<T>(sink: Arc<Mutex<T>>) -> Handler
where
    T: DeserializeOwned + Send + 'static,
{
    Arc::new(move |res: &mut Response| -> Result<(), BoxError> {
        let value: T = serde_json::from_reader(res.body_mut())?;
        *sink.lock().unwrap_or_else(PoisonError::into_inner) = value;
        Ok(())
    })
}

/// Copy the body into `writer`.
pub fn to_writer<W>(writer: Arc<Mutex<W>>) -> Handler
where
    W: Write + Send + 'static,
{
    Arc::new(move |res: &mut Response| -> Result<(), BoxError> {
        let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
        std::io::copy(res.body_mut(), &mut *writer)?;
        writer.flush()?;
        Ok(())
    })
}
