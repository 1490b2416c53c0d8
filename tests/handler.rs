// Gateway handler tests
#![allow(clippy::unwrap_used)]

use apigw_proxy::{
    Enrichment, Gateway, InvocationContext, Proxy, ProxyError, ProxyEvent, Request, RequestExt,
    ResponseWriter,
};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use lambda_runtime::{Context, LambdaEvent};
use std::sync::atomic::{AtomicUsize, Ordering};

fn hello_handler(_request: &Request, writer: &mut dyn ResponseWriter) {
    writer.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    writer.set_status(StatusCode::IM_A_TEAPOT);
    writer.write_all(br#""Hello World""#).unwrap();
}

fn pets_event() -> ProxyEvent {
    ProxyEvent {
        http_method: "GET".to_string(),
        path: "/pets".to_string(),
        ..ProxyEvent::default()
    }
}

#[test]
fn test_serve() {
    let gateway = Gateway::new(Proxy::new("api.example.com"), hello_handler);

    let response = gateway
        .serve(&InvocationContext::new(), &pets_event())
        .unwrap();

    assert_eq!(response.status_code, 418);
    assert_eq!(response.body, r#""Hello World""#);
    assert!(!response.is_base64_encoded);
    assert_eq!(response.headers["content-type"], "application/json");
}

fn stage_handler(request: &Request, writer: &mut dyn ResponseWriter) {
    let stage = request
        .request_context()
        .map_or("none", |rc| rc.stage.as_str());
    write!(writer, "{} {}", request.method(), stage).unwrap();
}

#[test]
fn test_serve_reads_request_context() {
    let gateway = Gateway::new(Proxy::new(""), stage_handler);

    let mut event = pets_event();
    event.request_context.stage = "prod".to_string();

    let response = gateway.serve(&InvocationContext::new(), &event).unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "GET prod");
}

static CALLS: AtomicUsize = AtomicUsize::new(0);

fn counting_handler(_request: &Request, _writer: &mut dyn ResponseWriter) {
    CALLS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn test_transform_error_skips_handler() {
    let gateway = Gateway::new(Proxy::new(""), counting_handler);

    let event = ProxyEvent {
        body: Some("not base64!".to_string()),
        is_base64_encoded: true,
        ..pets_event()
    };

    let err = gateway
        .serve(&InvocationContext::new(), &event)
        .unwrap_err();
    assert!(matches!(err, ProxyError::BodyDecode(_)));
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
}

#[test]
fn test_handle_maps_error_to_diagnostic() {
    let gateway = Gateway::new(
        Proxy::new("").with_enrichments(Vec::<Enrichment>::new()),
        hello_handler,
    );

    let event = LambdaEvent {
        payload: pets_event(),
        context: Context::default(),
    };

    let diagnostic = gateway.handle(event).unwrap_err();
    assert_eq!(diagnostic.error_type, "NoTransformDefinedError");
    assert_eq!(diagnostic.error_message, "no transform defined for proxy");
}

fn trace_handler(request: &Request, writer: &mut dyn ResponseWriter) {
    if let Some(trace) = request.headers().get("x-amzn-trace-id") {
        writer.write_all(trace.as_bytes()).unwrap();
    }
}

#[test]
fn test_handle_propagates_trace_id() {
    let gateway = Gateway::new(Proxy::new(""), trace_handler);

    let mut context = Context::default();
    context.xray_trace_id = Some("Root=1-5759e988-bd862e3fe1be46a994272793".to_string());

    let response = gateway
        .handle(LambdaEvent {
            payload: pets_event(),
            context,
        })
        .unwrap();
    assert_eq!(response.body, "Root=1-5759e988-bd862e3fe1be46a994272793");
}
