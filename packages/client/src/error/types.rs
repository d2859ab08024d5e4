use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `reqflow_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// A failure tagged with the stage of the request lifecycle that produced it.
///
/// Every error that leaves a `Builder` carries exactly one [`Kind`], so callers
/// and error interceptors can branch on the cause without string matching.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub url: Option<url::Url>,
}

/// The stage at which a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The URL could not be resolved from the base URL and overrides.
    Url,
    /// The outbound request could not be constructed.
    Request,
    /// The transport failed to deliver the request or receive a response.
    Connect,
    /// A response validator rejected the response.
    Validator,
    /// The terminal response handler failed.
    Handler,
}

impl Kind {
    /// Short, stable name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Url => "url",
            Kind::Request => "request",
            Kind::Connect => "connect",
            Kind::Validator => "validator",
            Kind::Handler => "handler",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner { kind, source: None, url: None }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: url::Url) -> Self {
        self.inner.url = Some(url);
        self
    }

    /// The lifecycle stage that produced this error.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&url::Url> {
        self.inner.url.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("reqflow::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref url) = self.inner.url {
            f.field("url", url);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.inner.kind {
            Kind::Url => "error building url",
            Kind::Request => "error building request",
            Kind::Connect => "error connecting",
            Kind::Validator => "response failed validation",
            Kind::Handler => "error handling response",
        };
        match &self.inner.source {
            Some(source) => write!(f, "{prefix}: {source}"),
            None => f.write_str(prefix),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
