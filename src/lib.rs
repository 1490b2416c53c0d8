//! Runs ordinary HTTP handling code behind an API Gateway proxy integration.
//!
//! A [`Proxy`] turns each [`ProxyEvent`] into an [`http::Request`], a
//! [`Handler`] writes its answer into a [`ResponseCapture`], and the capture
//! renders the [`ProxyResponse`] envelope returned to the gateway.
//! [`Gateway`] ties the three together and registers with the Lambda runtime.
//!
//! ```no_run
//! use apigw_proxy::{Gateway, Proxy, ProxyConfig, Request, ResponseWriter};
//! use http::StatusCode;
//!
//! fn hello(_request: &Request, writer: &mut dyn ResponseWriter) {
//!     writer.set_status(StatusCode::OK);
//!     let _ = writer.write_all(b"Hello World");
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     let proxy = Proxy::from_config(&ProxyConfig::from_env());
//!     Gateway::new(proxy, hello).run().await
//! }
//! ```

pub mod config;
pub mod context;
pub mod handler;
pub mod models;
pub mod proxy;
pub mod response;
pub mod utils;

pub use config::ProxyConfig;
pub use context::{InvocationContext, RemoteAddr, RequestExt, TraceId};
pub use handler::{Gateway, Handler};
pub use models::{ProxyError, ProxyEvent, ProxyRequestContext, ProxyResponse, RequestIdentity};
pub use proxy::{Enrichment, Proxy, Request};
pub use response::{ResponseCapture, ResponseWriter};
