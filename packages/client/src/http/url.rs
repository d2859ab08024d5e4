//! URL resolution utilities
//!
//! A base URL is split into [`UrlParts`], the parts are rewritten by scheme,
//! host, path and query overrides, and the result is reassembled and parsed
//! once more so that a rewrite can never produce an invalid `Url`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use thiserror::Error;
use url::{Position, Url};

use crate::http::multimap::{Multimap, apply_overrides};

/// Placeholder returned when no URL could be resolved.
static BLANK_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("about:blank").unwrap_or_else(|_| {
        panic!("URL parsing library completely broken - cannot parse about:blank")
    })
});

/// Origin that path-only bases are joined onto before their host is dropped.
const PATH_ONLY_ORIGIN: &str = "https://path-only.invalid";

/// An empty, always-printable URL (`about:blank`).
#[must_use]
pub fn blank_url() -> Url {
    BLANK_URL.clone()
}

/// Failure to resolve a URL from its parts.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("invalid url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("url has no host: {0:?}")]
    MissingHost(String),
}

/// The rewritable components of a URL.
///
/// `path`, `query` and `fragment` are kept in their escaped form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: Option<String>,
    pub userinfo: String,
    pub host: String,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl UrlParts {
    /// Split a base URL into parts.
    ///
    /// An empty base yields empty parts. A base that is only a path, such as
    /// `/api/v1`, keeps its path, query and fragment and leaves the host empty.
    /// Any other base without a scheme is read authority-first, so
    /// `example.com/a` has host `example.com` and no scheme.
    ///
    /// # Errors
    ///
    /// Returns the underlying `url::ParseError` when the base is malformed.
    pub fn parse(base: &str) -> Result<Self, url::ParseError> {
        let base = base.trim();
        if base.is_empty() {
            return Ok(Self::default());
        }
        match Url::parse(base) {
            Ok(parsed) => Ok(Self::from_url(&parsed, true)),
            Err(url::ParseError::RelativeUrlWithoutBase)
                if base.starts_with('/') && !base.starts_with("//") =>
            {
                let parsed = Url::parse(PATH_ONLY_ORIGIN)?.join(base)?;
                Ok(Self {
                    host: String::new(),
                    ..Self::from_url(&parsed, false)
                })
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let authority_first = if base.starts_with("//") {
                    format!("https:{base}")
                } else {
                    format!("https://{base}")
                };
                let parsed = Url::parse(&authority_first)?;
                Ok(Self::from_url(&parsed, false))
            }
            Err(e) => Err(e),
        }
    }

    fn from_url(url: &Url, has_scheme: bool) -> Self {
        Self {
            scheme: has_scheme.then(|| url.scheme().to_string()),
            userinfo: url[Position::BeforeUsername..Position::BeforeHost].to_string(),
            host: url[Position::BeforeHost..Position::AfterPort].to_string(),
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
        }
    }

    /// Join a path fragment onto the current path, see [`join_path`].
    pub fn push_path(&mut self, fragment: &str) {
        self.path = join_path(&self.path, fragment);
    }

    /// Overwrite query keys in registration order and re-encode the query.
    ///
    /// Keys are emitted sorted; values keep the order they were given in.
    pub fn apply_params(&mut self, overrides: &[Multimap]) {
        if overrides.is_empty() {
            return;
        }
        let mut query = query_map(self.query.as_deref());
        apply_overrides(&mut query, overrides);
        let encoded = encode_query(&query);
        self.query = if encoded.is_empty() { None } else { Some(encoded) };
    }

    /// Reassemble the parts, defaulting the scheme to `https`, and parse the result.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::MissingHost` when no host was given and
    /// `ResolveError::Parse` when the assembled string is not a valid URL.
    pub fn assemble(&self) -> Result<Url, ResolveError> {
        let scheme = self.scheme.as_deref().unwrap_or("https");
        if self.host.is_empty() {
            return Err(ResolveError::MissingHost(format!("{scheme}://{}", self.path)));
        }

        let mut assembled = format!("{scheme}://{}{}", self.userinfo, self.host);
        if !self.path.is_empty() && !self.path.starts_with('/') {
            assembled.push('/');
        }
        assembled.push_str(&self.path);
        if let Some(query) = &self.query {
            assembled.push('?');
            assembled.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            assembled.push('#');
            assembled.push_str(fragment);
        }

        Ok(Url::parse(&assembled)?)
    }
}

/// Join `fragment` onto `current` using reference-resolution rules.
///
/// A fragment starting with `/` replaces the path. Any other fragment is
/// placed below the current path, which is treated as a directory, and dot
/// segments are then removed, so `../` may ascend. Fragment text is escaped
/// segment by segment; an empty fragment leaves the path unchanged.
#[must_use]
pub fn join_path(current: &str, fragment: &str) -> String {
    if fragment.is_empty() {
        return current.to_string();
    }
    let fragment = escape_path(fragment);
    let merged = if fragment.starts_with('/') {
        fragment
    } else {
        let mut base = current.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        base.push_str(&fragment);
        base
    };
    remove_dot_segments(&merged)
}

fn escape_path(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment {
            "." | ".." => std::borrow::Cow::Borrowed(segment),
            _ => urlencoding::encode(segment),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Remove `.` and `..` segments (RFC 3986 section 5.2.4).
#[must_use]
pub fn remove_dot_segments(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();
    let mut segments = path.split('/').peekable();
    if absolute {
        segments.next();
    }

    let mut trailing_slash = false;
    while let Some(segment) = segments.next() {
        let is_last = segments.peek().is_none();
        match segment {
            "." => trailing_slash = is_last,
            ".." => {
                out.pop();
                trailing_slash = is_last;
            }
            other => {
                out.push(other);
                trailing_slash = false;
            }
        }
    }

    let mut result = String::with_capacity(path.len());
    if absolute {
        result.push('/');
    }
    result.push_str(&out.join("/"));
    if trailing_slash && !out.is_empty() {
        result.push('/');
    }
    result
}

/// Decode a raw query string into key → values, preserving value order.
#[must_use]
pub fn query_map(query: Option<&str>) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(query) = query {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            map.entry(key.into_owned()).or_default().push(value.into_owned());
        }
    }
    map
}

/// Encode key → values as `application/x-www-form-urlencoded`, keys sorted.
#[must_use]
pub fn encode_query(query: &BTreeMap<String, Vec<String>>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, values) in query {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}
