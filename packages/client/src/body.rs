//! Request body producers
//!
//! Every producer is a [`BodyGetter`]: calling it yields a fresh stream, so
//! the same logical body can be sent again by a transport that retries or
//! follows a redirect.

use std::io::{self, Cursor, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use serde::Serialize;

use crate::error::{BodyConsumedError, BoxError};
use crate::http::request::{BodyGetter, BodyReader};

/// Body from an in-memory buffer.
pub fn bytes(data: impl Into<Bytes>) -> BodyGetter {
    let data: Bytes = data.into();
    Arc::new(move || -> Result<BodyReader, BoxError> {
        Ok(Box::new(Cursor::new(data.clone())))
    })
}

/// Body from a stream that can only be read once.
///
/// A second invocation fails with [`BodyConsumedError`].
pub fn reader<R>(reader: R) -> BodyGetter
where
    R: Read + Send + 'static,
{
    let slot = Mutex::new(Some(reader));
    Arc::new(move || -> Result<BodyReader, BoxError> {
        let taken = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        match taken {
            Some(reader) => Ok(Box::new(reader) as BodyReader),
            None => Err(Box::new(BodyConsumedError) as BoxError),
        }
    })
}

/// Body encoded as JSON on every invocation.
pub fn json<T>(value: T) -> BodyGetter
where
    T: Serialize + Send + Sync + 'static,
{
    Arc::new(move || -> Result<BodyReader, BoxError> {
        let encoded = serde_json::to_vec(&value)?;
        Ok(Box::new(Cursor::new(encoded)) as BodyReader)
    })
}

/// Body encoded as `application/x-www-form-urlencoded` on every invocation.
pub fn form<T>(value: T) -> BodyGetter
where
    T: Serialize + Send + Sync + 'static,
{
    Arc::new(move || -> Result<BodyReader, BoxError> {
        let encoded = serde_urlencoded::to_string(&value)?;
        Ok(Box::new(Cursor::new(encoded.into_bytes())) as BodyReader)
    })
}

/// Body read from a file, reopened on every invocation.
pub fn file(path: impl Into<PathBuf>) -> BodyGetter {
    let path = path.into();
    Arc::new(move || -> Result<BodyReader, BoxError> {
        let file = std::fs::File::open(&path)?;
        Ok(Box::new(file) as BodyReader)
    })
}

/// Body produced by a closure writing into a fresh buffer on every invocation.
pub fn writer<F>(write: F) -> BodyGetter
where
    F: Fn(&mut dyn Write) -> io::Result<()> + Send + Sync + 'static,
{
    Arc::new(move || -> Result<BodyReader, BoxError> {
        let mut buf = Vec::new();
        write(&mut buf)?;
        Ok(Box::new(Cursor::new(buf)) as BodyReader)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn read_all(getter: &BodyGetter) -> String {
        let mut out = String::new();
        getter().unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn bytes_can_be_produced_repeatedly() {
        let getter = bytes("abc");
        assert_eq!(read_all(&getter), "abc");
        assert_eq!(read_all(&getter), "abc");
    }

    #[test]
    fn reader_is_single_use() {
        let getter = reader(Cursor::new("once"));
        assert_eq!(read_all(&getter), "once");
        let err = getter().err().unwrap();
        assert!(err.is::<BodyConsumedError>());
    }

    #[test]
    fn json_and_form_encode_values() {
        let mut map = BTreeMap::new();
        map.insert("name", "a b");
        assert_eq!(read_all(&json(map.clone())), r#"{"name":"a b"}"#);
        assert_eq!(read_all(&form(map)), "name=a+b");
    }

    #[test]
    fn writer_runs_per_invocation() {
        let getter = writer(|w| w.write_all(b"line\n"));
        assert_eq!(read_all(&getter), "line\n");
        assert_eq!(read_all(&getter), "line\n");
    }

    #[test]
    fn missing_file_fails_on_invocation() {
        let getter = file("/definitely/not/here.txt");
        assert!(getter().is_err());
    }
}
