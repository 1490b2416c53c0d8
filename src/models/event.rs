//! API Gateway proxy integration event (REST API, payload format 1.0).
//!
//! These types mirror the JSON document API Gateway hands to a Lambda
//! function configured with a proxy integration. Any map the gateway may
//! send as `null` is modelled as an `Option`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Event delivered by API Gateway for every proxied request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyEvent {
    pub resource: Option<String>,
    pub path: String,
    pub http_method: String,
    pub headers: Option<HashMap<String, String>>,
    pub multi_value_headers: Option<HashMap<String, Vec<String>>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    pub path_parameters: Option<HashMap<String, String>>,
    pub stage_variables: Option<HashMap<String, String>>,
    pub request_context: ProxyRequestContext,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

impl ProxyEvent {
    /// Query parameters with multi-value semantics.
    ///
    /// The multi-value map is authoritative. Single-value parameters are
    /// merged in only for keys the multi-value map does not carry, so an
    /// event built with `queryStringParameters` alone is still honoured.
    #[must_use]
    pub fn query_parameters(&self) -> HashMap<String, Vec<String>> {
        let mut merged = self
            .multi_value_query_string_parameters
            .clone()
            .unwrap_or_default();

        for (key, value) in self.query_string_parameters.iter().flatten() {
            merged
                .entry(key.clone())
                .or_insert_with(|| vec![value.clone()]);
        }

        merged
    }

    /// Body as sent by the gateway, possibly base64-encoded.
    #[must_use]
    pub fn raw_body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Gateway metadata about the invocation and its caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequestContext {
    pub account_id: String,
    pub resource_id: String,
    pub operation_name: Option<String>,
    pub stage: String,
    pub domain_name: Option<String>,
    pub domain_prefix: Option<String>,
    pub request_id: String,
    pub extended_request_id: Option<String>,
    pub protocol: Option<String>,
    pub identity: RequestIdentity,
    pub resource_path: String,
    pub path: Option<String>,
    /// Authorizer output; for Cognito user pools this carries the `claims` map.
    pub authorizer: Option<HashMap<String, Value>>,
    pub http_method: String,
    pub request_time: Option<String>,
    pub request_time_epoch: i64,
    pub api_id: String,
}

/// Caller identity as seen by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestIdentity {
    pub cognito_identity_pool_id: Option<String>,
    pub account_id: Option<String>,
    pub cognito_identity_id: Option<String>,
    pub caller: Option<String>,
    pub api_key: Option<String>,
    pub api_key_id: Option<String>,
    pub access_key: Option<String>,
    pub source_ip: Option<String>,
    pub cognito_authentication_type: Option<String>,
    pub cognito_authentication_provider: Option<String>,
    pub user_arn: Option<String>,
    pub user_agent: Option<String>,
    pub user: Option<String>,
}
