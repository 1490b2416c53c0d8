//! Utility functions shared across the proxy pipeline.

/// Strips the API Gateway base path from a request path.
///
/// Lets the same handler routing serve both the default `execute-api`
/// endpoint and a custom domain with a base path mapping.
///
/// Only the first textual occurrence of `base_path` is removed, and a
/// doubled leading slash left behind is collapsed:
/// `/pets/123` with base path `pets` → `/123`, `/pets` → `/`.
///
/// # Arguments
///
/// * `path` - The path as delivered in the event
/// * `base_path` - The configured base path, without a leading slash
#[must_use]
pub fn strip_base_path(path: &str, base_path: &str) -> String {
    if path == "/" || base_path.is_empty() {
        return path.to_string();
    }

    let mut stripped = if path
        .strip_prefix('/')
        .is_some_and(|rest| rest.starts_with(base_path))
    {
        path.replacen(base_path, "", 1)
    } else {
        path.to_string()
    };

    if stripped.starts_with("//") {
        stripped.remove(0);
    }

    stripped
}
