//! Schema generator for the proxy event and response envelope.
//!
//! Writes `proxy_schema.json` with the JSON schemas of the documents
//! exchanged with API Gateway, for use in fixtures and contract tests.

use anyhow::{Context, Result};
use apigw_proxy::{ProxyEvent, ProxyResponse};
use schemars::{JsonSchema, schema_for};
use serde_json::{Value, json};
use std::fs;

const OUTPUT: &str = "proxy_schema.json";

fn main() -> Result<()> {
    let schemas = json!({
        "event": generate_schema::<ProxyEvent>()?,
        "response": generate_schema::<ProxyResponse>()?,
    });

    let json = serde_json::to_string_pretty(&schemas).context("Failed to serialize schemas")?;
    fs::write(OUTPUT, json).with_context(|| format!("Failed to write {OUTPUT}"))?;

    println!("✅ Generated {OUTPUT}");
    Ok(())
}

// Generates the schema for T without the meta-schema reference
fn generate_schema<T: JsonSchema>() -> Result<Value> {
    let mut schema =
        serde_json::to_value(schema_for!(T)).context("Failed to serialize schema")?;

    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
    }

    Ok(schema)
}
