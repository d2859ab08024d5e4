//! Request body configuration
//!
//! Every body is stored as a producer that yields a fresh stream each time it
//! is invoked. Setting any body switches the inferred method to `POST`.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use bytes::Bytes;
use reqflow_client::BodyGetter;
use reqflow_client::body as producers;
use serde::Serialize;

use crate::builder::core::{Builder, ContentType};

impl Builder {
    /// Set the body producer.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use std::sync::Arc;
    ///
    /// use reqflow_client::{BodyReader, BoxError};
    ///
    /// let b = reqflow::url("https://example.com").body(Arc::new(
    ///     || -> Result<BodyReader, BoxError> { Ok(Box::new(Cursor::new("ping"))) },
    /// ));
    /// assert_eq!(b.method_name(), "POST");
    /// ```
    #[must_use]
    pub fn body(mut self, get_body: BodyGetter) -> Self {
        self.get_body = Some(get_body);
        self
    }

    /// Send an in-memory buffer.
    #[must_use]
    pub fn body_bytes(self, data: impl Into<Bytes>) -> Self {
        self.body(producers::bytes(data))
    }

    /// Send a stream that can be read only once.
    ///
    /// Building a second request from the same builder fails with a request
    /// error.
    #[must_use]
    pub fn body_reader<R>(self, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        self.body(producers::reader(reader))
    }

    /// Send `value` encoded as JSON and set `Content-Type: application/json`.
    ///
    /// # Arguments
    /// * `value` - The data to serialize, re-encoded for every request
    ///
    /// # Examples
    /// ```
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct User {
    ///     name: String,
    /// }
    ///
    /// let b = reqflow::url("https://example.com/users").body_json(User { name: "Ada".into() });
    /// assert_eq!(b.method_name(), "POST");
    /// ```
    #[must_use]
    pub fn body_json<T>(self, value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        self.body(producers::json(value))
            .content_type(ContentType::ApplicationJson)
    }

    /// Send `value` form-urlencoded and set
    /// `Content-Type: application/x-www-form-urlencoded`.
    #[must_use]
    pub fn body_form<T>(self, value: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        self.body(producers::form(value))
            .content_type(ContentType::ApplicationFormUrlEncoded)
    }

    /// Send the contents of a file, reopened for every request.
    #[must_use]
    pub fn body_file(self, path: impl Into<PathBuf>) -> Self {
        self.body(producers::file(path))
    }

    /// Send whatever `write` produces, run into a fresh buffer for every request.
    #[must_use]
    pub fn body_writer<F>(self, write: F) -> Self
    where
        F: Fn(&mut dyn Write) -> io::Result<()> + Send + Sync + 'static,
    {
        self.body(producers::writer(write))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::Read;

    use super::*;

    fn produced(b: &Builder) -> String {
        let get_body = b.get_body.as_ref().unwrap();
        let mut out = String::new();
        get_body().unwrap().read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn json_body_sets_content_type() {
        let b = Builder::new("https://example.com").body_json(BTreeMap::from([("k", 1)]));
        assert_eq!(produced(&b), r#"{"k":1}"#);
        let ct = b.header_overrides().last().unwrap();
        assert_eq!(ct.key, "content-type");
        assert_eq!(ct.values, ["application/json"]);
    }

    #[test]
    fn form_body_sets_content_type() {
        let b = Builder::new("https://example.com").body_form([("q", "a b")]);
        assert_eq!(produced(&b), "q=a+b");
        assert_eq!(
            b.header_overrides().last().unwrap().values,
            ["application/x-www-form-urlencoded"]
        );
    }

    #[test]
    fn writer_body_runs_per_invocation() {
        let b = Builder::new("").body_writer(|w| w.write_all(b"fresh"));
        assert_eq!(produced(&b), "fresh");
        assert_eq!(produced(&b), "fresh");
    }
}
