//! Invocation context passed into the proxy and carried onto the request.
//!
//! There is no global or task-local storage: the caller builds an
//! [`InvocationContext`], the proxy copies its values into the request's
//! [`http::Extensions`] and adds the gateway's [`ProxyRequestContext`].
//! Handler code reads them back through [`RequestExt`].

use http::Extensions;

use crate::models::ProxyRequestContext;

/// Trace identifier propagated as `X-Amzn-Trace-Id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub String);

/// Caller address as reported by the gateway (`identity.sourceIp`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteAddr(pub String);

/// Typed values scoped to a single invocation.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    extensions: Extensions,
}

impl InvocationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the context with `value` added, replacing any value of the same type.
    #[must_use]
    pub fn with<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }

    #[must_use]
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions.get::<T>()
    }

    /// Trace identifier stored under [`TraceId`], if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.get::<TraceId>().map(|trace| trace.0.as_str())
    }

    pub(crate) const fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}

impl From<&lambda_runtime::Context> for InvocationContext {
    fn from(context: &lambda_runtime::Context) -> Self {
        let mut invocation = Self::new().with(context.clone());
        if let Some(trace_id) = context.xray_trace_id.as_ref().filter(|id| !id.is_empty()) {
            invocation = invocation.with(TraceId(trace_id.clone()));
        }
        invocation
    }
}

/// Accessors for the values the proxy attaches to a request.
pub trait RequestExt {
    /// Gateway request context, present once the proxy attached it.
    fn request_context(&self) -> Option<&ProxyRequestContext>;

    /// Caller address; empty when the gateway did not report one.
    fn remote_addr(&self) -> &str;

    /// Lambda invocation context, when the request came through the runtime.
    fn lambda_context(&self) -> Option<&lambda_runtime::Context>;
}

impl<B> RequestExt for http::Request<B> {
    fn request_context(&self) -> Option<&ProxyRequestContext> {
        self.extensions().get::<ProxyRequestContext>()
    }

    fn remote_addr(&self) -> &str {
        self.extensions()
            .get::<RemoteAddr>()
            .map_or("", |addr| addr.0.as_str())
    }

    fn lambda_context(&self) -> Option<&lambda_runtime::Context> {
        self.extensions().get::<lambda_runtime::Context>()
    }
}
