//! Capture of handler output into the proxy response envelope.
//!
//! A [`ResponseCapture`] is open until [`finalize`](ResponseCapture::finalize)
//! renders it. Writing to a finalized capture is a programming error: debug
//! builds assert, release builds drop the write and log a warning.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::CONTENT_LENGTH;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use lambda_runtime::tracing::warn;
use std::collections::BTreeMap;
use std::io;

use crate::models::ProxyResponse;

/// Response side of the handler contract.
///
/// Body bytes go through [`io::Write`], so handlers can use `write_all` or
/// `write!`.
pub trait ResponseWriter: io::Write {
    /// Headers to send. Use this to add several values for one name.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sets a header, replacing any previous values for `name`.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers_mut().insert(name, value);
    }

    /// Sets the status code. Only the first status, explicit or implied by
    /// the first body write, takes effect.
    fn set_status(&mut self, status: StatusCode);

    /// Forces the body to be base64-encoded in the envelope.
    fn mark_binary(&mut self);
}

/// Records status, headers and body written by a handler.
#[derive(Debug, Default)]
pub struct ResponseCapture {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
    binary: bool,
    rendered: Option<ProxyResponse>,
}

impl ResponseCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status that will be rendered; `200 OK` until one is set.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        self.rendered.is_some()
    }

    /// Renders the envelope.
    ///
    /// The first call fixes the result; later calls return the same value.
    /// A body that is valid UTF-8 and was not marked binary is sent as text,
    /// anything else is base64-encoded. `Content-Length` is added unless the
    /// handler set it.
    pub fn finalize(&mut self) -> ProxyResponse {
        if let Some(rendered) = &self.rendered {
            return rendered.clone();
        }

        if !self.headers.contains_key(CONTENT_LENGTH) {
            self.headers
                .insert(CONTENT_LENGTH, HeaderValue::from(self.body.len()));
        }

        let (body, is_base64_encoded) = match std::str::from_utf8(&self.body) {
            Ok(text) if !self.binary => (text.to_string(), false),
            _ => (STANDARD.encode(&self.body), true),
        };

        let mut headers = BTreeMap::new();
        let mut multi_value_headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in &self.headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            multi_value_headers
                .entry(name.as_str().to_string())
                .or_default()
                .push(value.clone());
            headers.insert(name.as_str().to_string(), value);
        }

        let rendered = ProxyResponse {
            status_code: self.status().as_u16(),
            headers,
            multi_value_headers,
            body,
            is_base64_encoded,
        };
        self.rendered = Some(rendered.clone());
        rendered
    }

    fn check_open(&self, operation: &str) -> bool {
        debug_assert!(
            !self.is_finalized(),
            "{operation} on a finalized response"
        );
        if self.is_finalized() {
            warn!(operation, "Ignoring write to a finalized response");
            return false;
        }
        true
    }
}

impl ResponseWriter for ResponseCapture {
    /// After finalization the map is still handed out, but changes to it no
    /// longer reach the rendered envelope.
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.check_open("headers_mut");
        &mut self.headers
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.check_open("set_header") {
            self.headers.insert(name, value);
        }
    }

    fn set_status(&mut self, status: StatusCode) {
        if !self.check_open("set_status") {
            return;
        }
        match self.status {
            None => self.status = Some(status),
            Some(current) if current != status => {
                warn!(
                    current = current.as_u16(),
                    ignored = status.as_u16(),
                    "Status already set"
                );
            }
            Some(_) => {}
        }
    }

    fn mark_binary(&mut self) {
        if self.check_open("mark_binary") {
            self.binary = true;
        }
    }
}

impl io::Write for ResponseCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.check_open("write") {
            return Err(io::Error::other("response already finalized"));
        }
        self.status.get_or_insert(StatusCode::OK);
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
