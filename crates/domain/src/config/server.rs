use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub dns_port: u16,

    pub bind_address: String,

    /// Upper bound on queries handled at the same time.
    pub max_concurrent_queries: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: 2054,
            bind_address: "0.0.0.0".to_string(),
            max_concurrent_queries: 64,
        }
    }
}
