use serde::{Deserialize, Serialize};

/// Per-connector endpoint parameters, resolved from configuration at the
/// start of each request cycle.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Connectors {
    pub adyen: ConnectorParams,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ConnectorParams {
    /// base url
    #[serde(default)]
    pub base_url: String,
}

impl ConnectorParams {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

/// Outbound proxy settings for the HTTP client.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    #[serde(default)]
    pub bypass_proxy_urls: Vec<String>,
}
