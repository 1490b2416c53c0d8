//! Translation of API Gateway proxy events into `http::Request` values.
//!
//! A [`Proxy`] runs a fixed sequence: optional base path stripping, URI
//! composition, body decoding, request assembly, then each configured
//! [`Enrichment`] step. The first failure ends the transform and the
//! partially built request is dropped.

pub mod body;
pub mod enrich;
pub mod request;
pub mod uri;

use lambda_runtime::tracing::{debug, warn};
use std::borrow::Cow;

pub use enrich::Enrichment;
pub use request::Request;

use crate::config::ProxyConfig;
use crate::context::InvocationContext;
use crate::models::{ProxyError, ProxyEvent};
use crate::utils::strip_base_path;

/// Converts proxy events into requests for a configured host.
///
/// A proxy is immutable once built and can be shared between concurrent
/// invocations.
#[derive(Debug, Clone)]
pub struct Proxy {
    host: String,
    base_path: Option<String>,
    enrichments: Vec<Enrichment>,
}

impl Proxy {
    /// Proxy that keeps the event path as is.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            base_path: None,
            enrichments: Enrichment::ALL.to_vec(),
        }
    }

    /// Proxy that strips `base_path` from the event path before composing the URI.
    #[must_use]
    pub fn with_base_path(host: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            base_path: Some(base_path.into()),
            ..Self::new(host)
        }
    }

    /// Picks the base path stripping variant when `config` has a base path.
    #[must_use]
    pub fn from_config(config: &ProxyConfig) -> Self {
        if config.base_path.is_empty() {
            Self::new(config.host.clone())
        } else {
            Self::with_base_path(config.host.clone(), config.base_path.clone())
        }
    }

    /// Replaces the enrichment steps.
    ///
    /// Steps always run in [`Enrichment::ALL`] order whatever order they are
    /// given in; duplicates are dropped. An empty list makes every
    /// [`transform`](Self::transform) fail with
    /// [`ProxyError::NoTransformDefined`].
    #[must_use]
    pub fn with_enrichments(mut self, enrichments: impl IntoIterator<Item = Enrichment>) -> Self {
        let mut enrichments: Vec<Enrichment> = enrichments.into_iter().collect();
        enrichments.sort_unstable();
        enrichments.dedup();
        if enrichments.is_empty() {
            warn!(message = "Proxy configured without enrichment steps");
        }
        self.enrichments = enrichments;
        self
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    #[must_use]
    pub fn enrichments(&self) -> &[Enrichment] {
        &self.enrichments
    }

    /// Builds the request for `event`.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::NoTransformDefined`] if the proxy has no enrichment steps
    /// - [`ProxyError::MalformedPath`] if the path cannot form a URI
    /// - [`ProxyError::BodyDecode`] if a base64 body does not decode
    /// - [`ProxyError::RequestConstruction`] if the method or a header is invalid
    pub fn transform(
        &self,
        context: &InvocationContext,
        event: &ProxyEvent,
    ) -> Result<Request, ProxyError> {
        if self.enrichments.is_empty() {
            return Err(ProxyError::NoTransformDefined);
        }

        let path = self
            .base_path
            .as_deref()
            .map_or(Cow::Borrowed(event.path.as_str()), |base_path| {
                Cow::Owned(strip_base_path(&event.path, base_path))
            });

        let uri = uri::compose(&path, &event.query_parameters(), &self.host)?;
        let body = body::decode(event.raw_body(), event.is_base64_encoded)?;
        let mut request = request::assemble(&event.http_method, uri, body)?;

        for enrichment in &self.enrichments {
            enrichment.apply(&mut request, event, context)?;
        }

        debug!(
            method = %request.method(),
            uri = %request.uri(),
            request_id = %event.request_context.request_id,
            "Transformed proxy event"
        );

        Ok(request)
    }
}
