use std::env;

/// Environment variable holding the host set on every request.
pub const HOST_VAR: &str = "APIGW_PROXY_HOST";
/// Environment variable holding the base path to strip, e.g. `pets`.
pub const BASE_PATH_VAR: &str = "APIGW_PROXY_BASE_PATH";

/// Per-proxy configuration, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub base_path: String,
}

impl ProxyConfig {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            base_path: String::new(),
        }
    }

    /// Sets the base path; surrounding slashes are trimmed.
    #[must_use]
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.trim_matches('/').to_string();
        self
    }

    /// Reads the configuration from `APIGW_PROXY_HOST` and `APIGW_PROXY_BASE_PATH`.
    ///
    /// Both are optional and default to empty.
    #[must_use]
    pub fn from_env() -> Self {
        let host = env::var(HOST_VAR).unwrap_or_default();
        let base_path = env::var(BASE_PATH_VAR).unwrap_or_default();
        Self::new(host).with_base_path(&base_path)
    }
}
