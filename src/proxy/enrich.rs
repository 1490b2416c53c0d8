//! Enrichment steps applied to an assembled request.
//!
//! The steps run in declaration order. Later steps read what earlier ones
//! wrote: the header copy sees the `Host` set at assembly, the
//! content length is only filled in when no copied header supplied one, and
//! the custom headers overwrite anything the caller sent.

use http::header::{CONTENT_LENGTH, HOST};
use http::{HeaderName, HeaderValue};
use lambda_runtime::tracing::debug;
use std::collections::HashSet;

use super::Request;
use crate::context::{InvocationContext, RemoteAddr};
use crate::models::{ProxyError, ProxyEvent};

pub const X_REQUEST_ID: &str = "x-request-id";
pub const X_STAGE: &str = "x-stage";
pub const X_AMZN_TRACE_ID: &str = "x-amzn-trace-id";

/// A single enrichment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Enrichment {
    /// Copies the invocation context and the gateway request context into the request extensions.
    AttachContext,
    /// Records the caller's source IP as [`RemoteAddr`].
    RemoteAddr,
    /// Appends every event header, keeping repeated values as separate lines.
    HeaderFields,
    /// Sets `Content-Length` to the body length unless already present.
    ContentLength,
    /// Overwrites `X-Request-Id` and `X-Stage` from the request context.
    CustomHeaders,
    /// Sets `X-Amzn-Trace-Id` when the invocation carries a trace id.
    TraceHeader,
}

impl Enrichment {
    /// Every step, in the order the proxy applies them.
    pub const ALL: [Self; 6] = [
        Self::AttachContext,
        Self::RemoteAddr,
        Self::HeaderFields,
        Self::ContentLength,
        Self::CustomHeaders,
        Self::TraceHeader,
    ];

    /// Applies this step to `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::RequestConstruction`] if a header name or value
    /// taken from the event is not valid HTTP.
    pub fn apply(
        self,
        request: &mut Request,
        event: &ProxyEvent,
        context: &InvocationContext,
    ) -> Result<(), ProxyError> {
        match self {
            Self::AttachContext => {
                attach_context(request, event, context);
                Ok(())
            }
            Self::RemoteAddr => {
                set_remote_addr(request, event);
                Ok(())
            }
            Self::HeaderFields => set_header_fields(request, event),
            Self::ContentLength => {
                set_content_length(request);
                Ok(())
            }
            Self::CustomHeaders => set_custom_headers(request, event),
            Self::TraceHeader => set_trace_header(request, context),
        }
    }
}

fn attach_context(request: &mut Request, event: &ProxyEvent, context: &InvocationContext) {
    let extensions = request.extensions_mut();
    extensions.extend(context.extensions().clone());
    extensions.insert(event.request_context.clone());
}

fn set_remote_addr(request: &mut Request, event: &ProxyEvent) {
    let source_ip = event
        .request_context
        .identity
        .source_ip
        .clone()
        .unwrap_or_default();
    request.extensions_mut().insert(RemoteAddr(source_ip));
}

/// Multi-value headers are copied first. A single-value header is copied
/// only when no multi-value header of the same name exists. An event `Host`
/// is dropped when the request already has one from the configured host.
fn set_header_fields(request: &mut Request, event: &ProxyEvent) -> Result<(), ProxyError> {
    let keep_host = request.headers().contains_key(HOST);
    let mut seen = HashSet::new();

    for (name, values) in event.multi_value_headers.iter().flatten() {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        seen.insert(name.clone());
        if keep_host && name == HOST {
            debug!(message = "Ignoring event Host header in favour of configured host");
            continue;
        }
        for value in values {
            request
                .headers_mut()
                .append(name.clone(), HeaderValue::from_bytes(value.as_bytes())?);
        }
    }

    for (name, value) in event.headers.iter().flatten() {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        if seen.contains(&name) || (keep_host && name == HOST) {
            continue;
        }
        request
            .headers_mut()
            .append(name, HeaderValue::from_bytes(value.as_bytes())?);
    }

    Ok(())
}

fn set_content_length(request: &mut Request) {
    if !request.headers().contains_key(CONTENT_LENGTH) {
        let length = HeaderValue::from(request.body().len());
        request.headers_mut().insert(CONTENT_LENGTH, length);
    }
}

fn set_custom_headers(request: &mut Request, event: &ProxyEvent) -> Result<(), ProxyError> {
    let request_context = &event.request_context;
    let request_id = HeaderValue::from_str(&request_context.request_id)?;
    let stage = HeaderValue::from_str(&request_context.stage)?;

    let headers = request.headers_mut();
    headers.insert(X_REQUEST_ID, request_id);
    headers.insert(X_STAGE, stage);
    Ok(())
}

fn set_trace_header(request: &mut Request, context: &InvocationContext) -> Result<(), ProxyError> {
    if let Some(trace_id) = context.trace_id() {
        let value = HeaderValue::from_str(trace_id)?;
        request.headers_mut().insert(X_AMZN_TRACE_ID, value);
    }
    Ok(())
}
