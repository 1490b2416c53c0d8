//! Error types for the event-to-request translation.
//!
//! Every variant is terminal for the invocation: the proxy stops at the
//! first error and no response envelope is produced. Turning the error into
//! a failure the gateway understands is left to the caller.

use lambda_runtime::Diagnostic;
use thiserror::Error;

/// Errors raised while turning a [`ProxyEvent`](super::ProxyEvent) into a request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The event path cannot be used as a URI path.
    #[error("parsing path {path:?}: {reason}")]
    MalformedPath { path: String, reason: String },

    /// The event claimed a base64 body that does not decode.
    #[error("decoding base64 body: {0}")]
    BodyDecode(#[from] base64::DecodeError),

    /// Method, URI or a header could not be placed on the request.
    #[error("creating request: {0}")]
    RequestConstruction(String),

    /// The proxy was configured without any enrichment step.
    #[error("no transform defined for proxy")]
    NoTransformDefined,
}

impl ProxyError {
    pub(crate) fn malformed_path(path: &str, reason: impl ToString) -> Self {
        Self::MalformedPath {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Stable name of the variant, used as the Lambda `errorType`.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::MalformedPath { .. } => "MalformedPathError",
            Self::BodyDecode(_) => "BodyDecodeError",
            Self::RequestConstruction(_) => "RequestConstructionError",
            Self::NoTransformDefined => "NoTransformDefinedError",
        }
    }

    /// Converts the error into the diagnostic reported to the Lambda runtime.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            error_type: self.error_type().to_string(),
            error_message: self.to_string(),
        }
    }
}

impl From<http::Error> for ProxyError {
    fn from(error: http::Error) -> Self {
        Self::RequestConstruction(error.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for ProxyError {
    fn from(error: http::header::InvalidHeaderValue) -> Self {
        Self::RequestConstruction(error.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for ProxyError {
    fn from(error: http::header::InvalidHeaderName) -> Self {
        Self::RequestConstruction(error.to_string())
    }
}
