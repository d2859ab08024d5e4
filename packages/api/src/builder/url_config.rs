//! URL configuration
//!
//! Scheme, host, path and query overrides layered over the base URL.

use reqflow_client::Multimap;

use crate::builder::core::Builder;

impl Builder {
    /// Replace the base URL's scheme.
    ///
    /// An empty scheme clears the override and keeps the base's own.
    ///
    /// # Examples
    /// ```
    /// let u = reqflow::url("https://example.com").scheme("http").url().unwrap();
    /// assert_eq!(u.as_str(), "http://example.com/");
    /// ```
    #[must_use]
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Replace the base URL's host (and port, if given as `host:port`).
    ///
    /// An empty host clears the override and keeps the base's own.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Append a path fragment.
    ///
    /// A fragment starting with `/` replaces the path; anything else is
    /// resolved below the current path, so `"../x"` can climb out of it.
    ///
    /// # Examples
    /// ```
    /// let b = reqflow::url("https://example.com/a");
    /// assert_eq!(b.clone().path("b").url().unwrap().path(), "/a/b");
    /// assert_eq!(b.clone().path("/c").url().unwrap().path(), "/c");
    /// assert_eq!(b.path("b/").path("../d").url().unwrap().path(), "/a/d");
    /// ```
    #[must_use]
    pub fn path(mut self, fragment: impl Into<String>) -> Self {
        self.paths.push(fragment.into());
        self
    }

    /// Set a query parameter, replacing any values the key already had.
    ///
    /// Repeated calls for one key keep only the last call's values.
    ///
    /// # Examples
    /// ```
    /// let u = reqflow::url("https://example.com/?b=2")
    ///     .param("a", ["1", "2"])
    ///     .param("a", ["3"])
    ///     .url()
    ///     .unwrap();
    /// assert_eq!(u.query(), Some("a=3&b=2"));
    /// ```
    #[must_use]
    pub fn param<K, I, V>(mut self, key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.params.push(Multimap::new(key, values));
        self
    }
}
