//! Authentication methods for HTTP requests
//!
//! Provides convenient methods for setting the `Authorization` header for
//! basic and bearer token authentication.

use reqflow_client::http::{basic_auth_value, bearer_value};

use crate::builder::core::Builder;
use crate::builder::headers::header;

impl Builder {
    /// Set basic authentication header
    ///
    /// Creates a Basic Authentication header using the provided username and password.
    /// The credentials are base64 encoded as required by the HTTP specification.
    ///
    /// # Arguments
    /// * `user` - The username
    /// * `pass` - The password
    ///
    /// # Returns
    /// `Self` for method chaining
    ///
    /// # Examples
    /// ```
    /// let req = reqflow::url("https://example.com")
    ///     .basic_auth("Aladdin", "open sesame")
    ///     .request()
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(
    ///     req.headers()["authorization"],
    ///     "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
    /// );
    /// ```
    #[must_use]
    pub fn basic_auth(self, user: &str, pass: &str) -> Self {
        self.header(header::AUTHORIZATION.as_str(), [basic_auth_value(user, pass)])
    }

    /// Set bearer token authentication header
    ///
    /// # Arguments
    /// * `token` - The bearer token
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header(header::AUTHORIZATION.as_str(), [bearer_value(token)])
    }
}
