//! URI composition from the event path, query maps and configured host.

use http::Uri;
use http::uri::{Authority, Parts, PathAndQuery, Scheme};
use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::HashMap;

use crate::models::ProxyError;

/// Characters API Gateway leaves decoded in `path` that cannot appear raw in a URI path.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Everything but alphanumerics and `-_.~` is escaped in query keys and values.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds the request URI.
///
/// The result is origin-form (`/pets?order=desc`) when `host` is empty and
/// absolute (`https://api.example.com/pets?order=desc`) otherwise. Anything
/// after a `?` in `path` is discarded; the query comes from `query` alone.
///
/// # Errors
///
/// Returns [`ProxyError::MalformedPath`] if the path holds an invalid
/// percent-escape or a control character, or if the path or host cannot be
/// represented in a URI.
pub fn compose(
    path: &str,
    query: &HashMap<String, Vec<String>>,
    host: &str,
) -> Result<Uri, ProxyError> {
    let path = path.split_once('?').map_or(path, |(path, _)| path);
    let path = if path.is_empty() { "/" } else { path };

    check_control_characters(path)?;
    check_percent_escapes(path)?;

    let mut path_and_query = utf8_percent_encode(path, PATH).to_string();
    let encoded_query = encode_query(query);
    if !encoded_query.is_empty() {
        path_and_query.push('?');
        path_and_query.push_str(&encoded_query);
    }

    let mut parts = Parts::default();
    parts.path_and_query = Some(
        PathAndQuery::try_from(path_and_query).map_err(|e| ProxyError::malformed_path(path, e))?,
    );
    if !host.is_empty() {
        parts.scheme = Some(Scheme::HTTPS);
        parts.authority = Some(
            Authority::try_from(host)
                .map_err(|e| ProxyError::malformed_path(path, format!("host {host:?}: {e}")))?,
        );
    }

    Uri::from_parts(parts).map_err(|e| ProxyError::malformed_path(path, e))
}

/// Encodes a multi-value query map as `key=value` pairs joined by `&`.
///
/// Keys are sorted; the values of a key keep their original order. Spaces
/// become `+` and every byte outside alphanumerics and `-_.~` is
/// percent-encoded.
#[must_use]
pub fn encode_query(query: &HashMap<String, Vec<String>>) -> String {
    let mut keys: Vec<&String> = query.keys().collect();
    keys.sort_unstable();

    let mut pairs = Vec::new();
    for key in keys {
        let key_escaped = escape_query_component(key);
        for value in &query[key] {
            pairs.push(format!("{key_escaped}={}", escape_query_component(value)));
        }
    }
    pairs.join("&")
}

fn escape_query_component(component: &str) -> String {
    component
        .split(' ')
        .map(|part| utf8_percent_encode(part, QUERY).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Rejects ASCII control bytes, which cannot be carried in a URI.
fn check_control_characters(path: &str) -> Result<(), ProxyError> {
    if let Some(index) = path.bytes().position(|b| b.is_ascii_control()) {
        return Err(ProxyError::malformed_path(
            path,
            format!("invalid control character at byte {index}"),
        ));
    }
    Ok(())
}

/// Rejects `%` not followed by two hex digits.
fn check_percent_escapes(path: &str) -> Result<(), ProxyError> {
    let bytes = path.as_bytes();
    for (index, _) in path.match_indices('%') {
        let valid = bytes
            .get(index + 1..index + 3)
            .is_some_and(|digits| digits.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(ProxyError::malformed_path(
                path,
                format!("invalid URL escape at byte {index}"),
            ));
        }
    }
    Ok(())
}
