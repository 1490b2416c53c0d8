// Integration tests for the full event -> handler -> envelope flow
#![allow(clippy::unwrap_used)]

use apigw_proxy::{
    Gateway, InvocationContext, Proxy, ProxyConfig, ProxyEvent, ProxyResponse, Request,
    RequestExt, ResponseWriter,
};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use lambda_runtime::{Context, LambdaEvent};
use serde_json::{Value, json};
use std::sync::Arc;

// Echoes the adapted request back as JSON
fn echo_handler(request: &Request, writer: &mut dyn ResponseWriter) {
    let payload = json!({
        "method": request.method().as_str(),
        "uri": request.uri().to_string(),
        "host": request.headers().get("host").map(|v| v.to_str().unwrap()),
        "remoteAddr": request.remote_addr(),
        "requestId": request.headers()["x-request-id"].to_str().unwrap(),
        "stage": request.headers()["x-stage"].to_str().unwrap(),
        "contentLength": request.headers()["content-length"].to_str().unwrap(),
        "accept": request
            .headers()
            .get_all("accept")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect::<Vec<_>>(),
        "claims": request
            .request_context()
            .and_then(|rc| rc.authorizer.as_ref())
            .and_then(|authorizer| authorizer.get("claims"))
            .cloned(),
        "body": String::from_utf8_lossy(request.body()),
    });

    writer.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    writer.set_status(StatusCode::CREATED);
    writer.write_all(payload.to_string().as_bytes()).unwrap();
}

fn gateway_event() -> Value {
    json!({
        "resource": "/{proxy+}",
        "path": "/v1/pets",
        "httpMethod": "POST",
        "headers": {
            "Accept": "application/json",
            "Content-Type": "application/json",
            "Host": "xxxxxxxxxx.execute-api.us-east-1.amazonaws.com",
            "X-Forwarded-For": "1.2.3.4, 5.6.7.8"
        },
        "multiValueHeaders": {
            "Accept": ["application/json", "text/plain"],
            "Content-Type": ["application/json"],
            "Host": ["xxxxxxxxxx.execute-api.us-east-1.amazonaws.com"],
            "X-Forwarded-For": ["1.2.3.4, 5.6.7.8"]
        },
        "queryStringParameters": { "order": "desc" },
        "multiValueQueryStringParameters": {
            "order": ["desc"],
            "fields": ["name", "species"]
        },
        "pathParameters": { "proxy": "pets" },
        "stageVariables": null,
        "requestContext": {
            "accountId": "123456789012",
            "resourceId": "us4z18",
            "stage": "prod",
            "requestId": "41b45ea3-70b5-11e6-b7bd-69b5aaebc7d9",
            "identity": {
                "cognitoIdentityPoolId": null,
                "accountId": null,
                "cognitoIdentityId": null,
                "caller": null,
                "apiKey": null,
                "sourceIp": "192.168.100.1",
                "cognitoAuthenticationType": null,
                "cognitoAuthenticationProvider": null,
                "userArn": null,
                "userAgent": "curl/7.64.1",
                "user": null
            },
            "authorizer": {
                "claims": { "cognito:username": "johndoe" }
            },
            "resourcePath": "/{proxy+}",
            "httpMethod": "POST",
            "requestTimeEpoch": 1_583_798_639_428_i64,
            "apiId": "wt6mne2s9k"
        },
        "body": "{ \"name\": \"Tobi\" }",
        "isBase64Encoded": false
    })
}

#[test]
fn test_full_request_flow() {
    let config = ProxyConfig::new("api.example.com").with_base_path("v1");
    let gateway = Gateway::new(Proxy::from_config(&config), echo_handler);

    let event: ProxyEvent = serde_json::from_value(gateway_event()).unwrap();
    let response = gateway.serve(&InvocationContext::new(), &event).unwrap();

    assert_eq!(response.status_code, 201);
    assert!(!response.is_base64_encoded);
    assert_eq!(response.headers["content-type"], "application/json");

    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(
        echoed["uri"],
        "https://api.example.com/pets?fields=name&fields=species&order=desc"
    );
    assert_eq!(echoed["host"], "api.example.com");
    assert_eq!(echoed["remoteAddr"], "192.168.100.1");
    assert_eq!(echoed["requestId"], "41b45ea3-70b5-11e6-b7bd-69b5aaebc7d9");
    assert_eq!(echoed["stage"], "prod");
    assert_eq!(echoed["contentLength"], "18");
    assert_eq!(echoed["accept"], json!(["application/json", "text/plain"]));
    assert_eq!(echoed["claims"]["cognito:username"], "johndoe");
    assert_eq!(echoed["body"], r#"{ "name": "Tobi" }"#);
}

#[tokio::test]
async fn test_lambda_event_round_trip() {
    let gateway = Gateway::new(Proxy::new("api.example.com"), echo_handler);

    let event = LambdaEvent {
        payload: serde_json::from_value(gateway_event()).unwrap(),
        context: Context::default(),
    };

    let response = gateway.handle(event).unwrap();
    let envelope = serde_json::to_value(&response).unwrap();

    assert_eq!(envelope["statusCode"], 201);
    assert_eq!(envelope["isBase64Encoded"], false);
    assert_eq!(envelope["multiValueHeaders"]["content-type"][0], "application/json");

    let parsed: ProxyResponse = serde_json::from_value(envelope).unwrap();
    assert_eq!(parsed, response);
}

#[tokio::test]
async fn test_concurrent_invocations() {
    let gateway = Arc::new(Gateway::new(Proxy::new("api.example.com"), echo_handler));

    let mut handles = vec![];
    for i in 0..10 {
        let gateway = Arc::clone(&gateway);
        handles.push(tokio::spawn(async move {
            let mut payload = gateway_event();
            payload["requestContext"]["requestId"] = json!(format!("request-{i}"));
            let event = LambdaEvent {
                payload: serde_json::from_value(payload).unwrap(),
                context: Context::default(),
            };
            (i, gateway.handle(event))
        }));
    }

    let results = futures::future::join_all(handles).await;
    for result in results {
        let (i, response) = result.unwrap();
        let echoed: Value = serde_json::from_str(&response.unwrap().body).unwrap();
        assert_eq!(echoed["requestId"], format!("request-{i}"));
    }
}
