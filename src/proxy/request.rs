use bytes::Bytes;
use http::header::HOST;
use http::{HeaderValue, Method, Uri};

use crate::models::ProxyError;

/// Request handed to handler code.
pub type Request = http::Request<Bytes>;

/// Combines method, URI and body into a request.
///
/// An empty method means `GET`. When the URI is absolute its authority is
/// also set as the `Host` header.
///
/// # Errors
///
/// Returns [`ProxyError::RequestConstruction`] if `method` is not a valid
/// HTTP token.
pub fn assemble(method: &str, uri: Uri, body: Bytes) -> Result<Request, ProxyError> {
    let method = if method.is_empty() {
        Method::GET
    } else {
        Method::from_bytes(method.as_bytes()).map_err(|e| {
            ProxyError::RequestConstruction(format!("invalid method {method:?}: {e}"))
        })?
    };

    let host = uri
        .authority()
        .map(|authority| HeaderValue::from_str(authority.as_str()))
        .transpose()?;

    let mut request = http::Request::builder().method(method).uri(uri).body(body)?;
    if let Some(host) = host {
        request.headers_mut().insert(HOST, host);
    }

    Ok(request)
}
