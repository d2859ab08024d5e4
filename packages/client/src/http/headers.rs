//! Header helpers - using standard http crate types

use base64::{Engine as _, engine::general_purpose};
use cookie::Cookie;
use http::header::{self, InvalidHeaderName, InvalidHeaderValue};
use http::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

use crate::http::multimap::{KeyValue, Multimap};

/// A header override that cannot be represented on the wire.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("invalid header name {name:?}: {source}")]
    Name {
        name: String,
        source: InvalidHeaderName,
    },
    #[error("invalid value for header {name:?}: {source}")]
    Value {
        name: String,
        source: InvalidHeaderValue,
    },
}

/// Set `key` to exactly `values`, replacing whatever was there before.
///
/// The key is canonicalized by `HeaderName`; an empty value list removes the header.
/// Credential headers are marked sensitive so they never show up in `Debug` output.
///
/// # Errors
///
/// Returns `HeaderError` when the name or one of the values is not valid HTTP.
pub fn set_header(headers: &mut HeaderMap, key: &str, values: &[String]) -> Result<(), HeaderError> {
    let name = HeaderName::from_bytes(key.as_bytes()).map_err(|source| HeaderError::Name {
        name: key.to_string(),
        source,
    })?;
    let values = values
        .iter()
        .map(|value| {
            let mut value = HeaderValue::from_str(value).map_err(|source| HeaderError::Value {
                name: key.to_string(),
                source,
            })?;
            value.set_sensitive(is_credential(&name));
            Ok::<_, HeaderError>(value)
        })
        .collect::<Result<Vec<_>, _>>()?;

    headers.remove(&name);
    for value in values {
        headers.append(name.clone(), value);
    }
    Ok(())
}

/// Apply header overrides in registration order; the last entry for a name wins.
///
/// # Errors
///
/// Returns the first `HeaderError` encountered.
pub fn apply_header_overrides(headers: &mut HeaderMap, overrides: &[Multimap]) -> Result<(), HeaderError> {
    for entry in overrides {
        set_header(headers, &entry.key, &entry.values)?;
    }
    Ok(())
}

/// Append a cookie to the `Cookie` header without touching earlier cookies.
///
/// The name and value are sanitized first, so each call adds exactly one
/// cookie to the header whatever text it was given.
///
/// # Errors
///
/// Returns `HeaderError::Value` when the resulting header is not valid HTTP.
pub fn add_cookie(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), HeaderError> {
    let pair = format!("{}={}", sanitize_cookie_name(name), sanitize_cookie_value(value));
    let mut joined = match headers.get(header::COOKIE) {
        Some(existing) if !existing.is_empty() => {
            let mut bytes = existing.as_bytes().to_vec();
            bytes.extend_from_slice(b"; ");
            bytes
        }
        _ => Vec::with_capacity(pair.len()),
    };
    joined.extend_from_slice(pair.as_bytes());
    let mut value = HeaderValue::from_bytes(&joined).map_err(|source| HeaderError::Value {
        name: header::COOKIE.to_string(),
        source,
    })?;
    value.set_sensitive(true);
    headers.insert(header::COOKIE, value);
    Ok(())
}

fn is_credential(name: &HeaderName) -> bool {
    [header::AUTHORIZATION, header::PROXY_AUTHORIZATION, header::COOKIE].contains(name)
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

/// Replace every character that is not an RFC 7230 token character with `-`.
fn sanitize_cookie_name(name: &str) -> String {
    name.chars().map(|c| if is_token_char(c) { c } else { '-' }).collect()
}

/// Keep printable ASCII other than `"`, `;` and `\`, quoting the result
/// when it contains a space or a comma.
fn sanitize_cookie_value(value: &str) -> String {
    let kept: String = value
        .chars()
        .filter(|&c| matches!(c, ' '..='~') && !matches!(c, '"' | ';' | '\\'))
        .collect();
    if kept.contains([' ', ',']) {
        format!("\"{kept}\"")
    } else {
        kept
    }
}

/// Append every cookie in order.
///
/// # Errors
///
/// Returns the first `HeaderError` encountered.
pub fn apply_cookies(headers: &mut HeaderMap, cookies: &[KeyValue]) -> Result<(), HeaderError> {
    for cookie in cookies {
        add_cookie(headers, &cookie.key, &cookie.value)?;
    }
    Ok(())
}

/// Read the cookies carried by the `Cookie` headers, in order.
#[must_use]
pub fn request_cookies(headers: &HeaderMap) -> Vec<KeyValue> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .map(|cookie| KeyValue::new(cookie.name(), cookie.value()))
        .collect()
}

/// `Authorization` value for HTTP basic authentication.
#[must_use]
pub fn basic_auth_value(user: &str, pass: &str) -> String {
    let credentials = format!("{user}:{pass}");
    format!("Basic {}", general_purpose::STANDARD.encode(credentials))
}

/// `Authorization` value for a bearer token.
#[must_use]
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_keys_are_canonicalized_and_overridden() {
        let mut headers = HeaderMap::new();
        apply_header_overrides(
            &mut headers,
            &[
                Multimap::new("X-Trace", ["a", "b"]),
                Multimap::new("Accept", ["text/plain"]),
                Multimap::new("x-trace", ["c"]),
            ],
        )
        .unwrap();

        let trace: Vec<_> = headers.get_all("x-trace").iter().collect();
        assert_eq!(trace, vec!["c"]);
        assert_eq!(headers.get(header::ACCEPT).unwrap(), "text/plain");
    }

    #[test]
    fn invalid_header_names_are_rejected() {
        let mut headers = HeaderMap::new();
        let err = set_header(&mut headers, "bad header", &["x".to_string()]).unwrap_err();
        assert!(matches!(err, HeaderError::Name { .. }));
    }

    #[test]
    fn cookies_accumulate_in_order() {
        let mut headers = HeaderMap::new();
        apply_cookies(
            &mut headers,
            &[KeyValue::new("a", "1"), KeyValue::new("b", "2"), KeyValue::new("a", "3")],
        )
        .unwrap();

        assert_eq!(headers.get(header::COOKIE).unwrap(), "a=1; b=2; a=3");
        let parsed = request_cookies(&headers);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2], KeyValue::new("a", "3"));
    }

    #[test]
    fn cookie_values_cannot_inject_extra_cookies() {
        let mut headers = HeaderMap::new();
        add_cookie(&mut headers, "a", "1; admin=true").unwrap();
        add_cookie(&mut headers, "se;ss", "x\"y\\z").unwrap();

        assert_eq!(headers.get(header::COOKIE).unwrap(), "a=\"1 admin=true\"; se-ss=xyz");
        let parsed = request_cookies(&headers);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].key, "se-ss");
    }

    #[test]
    fn non_ascii_cookie_values_keep_earlier_cookies() {
        let mut headers = HeaderMap::new();
        apply_cookies(&mut headers, &[KeyValue::new("a", "café"), KeyValue::new("b", "2")]).unwrap();

        assert_eq!(headers.get(header::COOKIE).unwrap(), "a=caf; b=2");
        assert_eq!(request_cookies(&headers), vec![KeyValue::new("a", "caf"), KeyValue::new("b", "2")]);
    }

    #[test]
    fn cookie_values_with_spaces_or_commas_are_quoted() {
        let mut headers = HeaderMap::new();
        apply_cookies(&mut headers, &[KeyValue::new("a", "x y"), KeyValue::new("b", "1,2")]).unwrap();

        assert_eq!(headers.get(header::COOKIE).unwrap(), "a=\"x y\"; b=\"1,2\"");
        assert_eq!(request_cookies(&headers).len(), 2);
    }

    #[test]
    fn cookies_join_onto_a_non_utf8_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_bytes(b"z=\xff").unwrap());
        add_cookie(&mut headers, "a", "1").unwrap();

        assert_eq!(headers.get(header::COOKIE).unwrap().as_bytes(), b"z=\xff; a=1");
    }

    #[test]
    fn credential_headers_are_hidden_from_debug_output() {
        let mut headers = HeaderMap::new();
        set_header(&mut headers, "Authorization", &[bearer_value("s3cret")]).unwrap();
        set_header(&mut headers, "Proxy-Authorization", &[basic_auth_value("u", "p")]).unwrap();
        set_header(&mut headers, "X-Trace", &["visible".to_string()]).unwrap();
        add_cookie(&mut headers, "session", "abc123").unwrap();

        assert!(headers[header::AUTHORIZATION].is_sensitive());
        assert!(headers[header::PROXY_AUTHORIZATION].is_sensitive());
        assert!(headers[header::COOKIE].is_sensitive());
        assert!(!headers["x-trace"].is_sensitive());

        let printed = format!("{headers:?}");
        assert!(!printed.contains("s3cret"));
        assert!(!printed.contains("abc123"));
        assert!(printed.contains("visible"));
    }

    #[test]
    fn basic_auth_is_base64_encoded() {
        assert_eq!(basic_auth_value("user", "pass"), "Basic dXNlcjpwYXNz");
        assert_eq!(bearer_value("tok"), "Bearer tok");
    }
}
