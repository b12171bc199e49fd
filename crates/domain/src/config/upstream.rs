use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Resolver every query is forwarded to.
    pub address: String,

    /// Local address the per-query outgoing socket binds to.
    pub bind_address: String,

    pub query_timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.address
            .parse()
            .map_err(|e| format!("Invalid upstream address '{}': {}", self.address, e))
    }

    pub fn local_addr(&self) -> Result<SocketAddr, String> {
        self.bind_address
            .parse()
            .map_err(|e| format!("Invalid upstream bind address '{}': {}", self.bind_address, e))
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "8.8.8.8:53".to_string(),
            bind_address: "0.0.0.0:0".to_string(),
            query_timeout_ms: 3000,
        }
    }
}
