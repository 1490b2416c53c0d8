use lambda_runtime::tracing::{debug, error, info};
use lambda_runtime::{Diagnostic, LambdaEvent, service_fn};

use crate::context::InvocationContext;
use crate::models::{ProxyError, ProxyEvent, ProxyResponse};
use crate::proxy::{Proxy, Request};
use crate::response::{ResponseCapture, ResponseWriter};

/// HTTP handling code run inside an adapted request.
pub trait Handler: Send + Sync {
    fn serve_http(&self, request: &Request, writer: &mut dyn ResponseWriter);
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut dyn ResponseWriter) + Send + Sync,
{
    fn serve_http(&self, request: &Request, writer: &mut dyn ResponseWriter) {
        self(request, writer);
    }
}

/// Serves proxy events with a [`Handler`], the way an HTTP server serves
/// connections.
pub struct Gateway<H> {
    proxy: Proxy,
    handler: H,
}

impl<H: Handler> Gateway<H> {
    #[must_use]
    pub const fn new(proxy: Proxy, handler: H) -> Self {
        Self { proxy, handler }
    }

    #[must_use]
    pub const fn proxy(&self) -> &Proxy {
        &self.proxy
    }

    /// Transforms `event`, runs the handler once and renders its response.
    ///
    /// # Errors
    ///
    /// Returns the [`ProxyError`] from the transform unchanged. The handler is
    /// not invoked and no envelope is produced.
    pub fn serve(
        &self,
        context: &InvocationContext,
        event: &ProxyEvent,
    ) -> Result<ProxyResponse, ProxyError> {
        let request = self.proxy.transform(context, event)?;

        let mut capture = ResponseCapture::new();
        self.handler.serve_http(&request, &mut capture);
        let response = capture.finalize();

        info!(
            method = %request.method(),
            path = %request.uri().path(),
            status = response.status_code,
            base64 = response.is_base64_encoded,
            "Request served"
        );

        Ok(response)
    }

    /// Lambda entry point for a single invocation.
    ///
    /// # Errors
    ///
    /// Returns a `Diagnostic` whose `error_type` names the [`ProxyError`]
    /// variant (`MalformedPathError`, `BodyDecodeError`,
    /// `RequestConstructionError` or `NoTransformDefinedError`).
    pub fn handle(&self, event: LambdaEvent<ProxyEvent>) -> Result<ProxyResponse, Diagnostic> {
        let (event, context) = event.into_parts();
        debug!(request_id = %context.request_id, "Handling proxy event");

        let invocation = InvocationContext::from(&context);
        self.serve(&invocation, &event).map_err(|e| {
            error!(error = %e, error_type = e.error_type(), "Failed to transform proxy event");
            e.to_diagnostic()
        })
    }

    /// Registers the gateway with the Lambda runtime and serves events until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be started or its API fails.
    pub async fn run(&self) -> Result<(), lambda_runtime::Error> {
        lambda_runtime::run(service_fn(|event: LambdaEvent<ProxyEvent>| async move {
            self.handle(event)
        }))
        .await
    }
}
