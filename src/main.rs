use apigw_proxy::{Gateway, Proxy, ProxyConfig, Request, RequestExt, ResponseWriter};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use lambda_runtime::Error;
use lambda_runtime::tracing::{error, info};
use serde_json::{Map, Value, json};

/// Echoes what the handler sees of the adapted request.
fn echo(request: &Request, writer: &mut dyn ResponseWriter) {
    let headers: Map<String, Value> = request
        .headers()
        .keys()
        .map(|name| {
            let values = request
                .headers()
                .get_all(name)
                .iter()
                .map(|value| Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()))
                .collect();
            (name.as_str().to_string(), Value::Array(values))
        })
        .collect();

    let payload = json!({
        "method": request.method().as_str(),
        "uri": request.uri().to_string(),
        "remoteAddr": request.remote_addr(),
        "requestId": request.request_context().map(|rc| rc.request_id.as_str()),
        "stage": request.request_context().map(|rc| rc.stage.as_str()),
        "headers": headers,
        "body": String::from_utf8_lossy(request.body()),
    });

    writer.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    writer.set_status(StatusCode::OK);
    if let Err(e) = writer.write_all(payload.to_string().as_bytes()) {
        error!(error = %e, "Failed to write response body");
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Use Lambda runtime's built-in tracing subscriber for CloudWatch Logs
    lambda_runtime::tracing::init_default_subscriber();

    let config = ProxyConfig::from_env();
    info!(host = %config.host, base_path = %config.base_path, "Starting proxy gateway");

    Gateway::new(Proxy::from_config(&config), echo).run().await
}
