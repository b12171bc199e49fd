use serde::{Deserialize, Serialize};

use super::codec::CodecConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_FILE: &str = "dns-relay.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening socket and worker bound
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolver the relay forwards to
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Wire codec behaviour
    #[serde(default)]
    pub codec: CodecConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-relay.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::from_file(LOCAL_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(workers) = overrides.max_concurrent_queries {
            self.server.max_concurrent_queries = workers;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.address = upstream;
        }
        if let Some(timeout_ms) = overrides.query_timeout_ms {
            self.upstream.query_timeout_ms = timeout_ms;
        }
        if overrides.strict_record_types {
            self.codec.strict_record_types = true;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.max_concurrent_queries == 0 {
            return Err(ConfigError::Validation(
                "max_concurrent_queries must be at least 1".to_string(),
            ));
        }

        self.upstream.socket_addr().map_err(ConfigError::Validation)?;
        self.upstream.local_addr().map_err(ConfigError::Validation)?;

        if self.upstream.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "query_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn listen_address(&self) -> String {
        if self.server.bind_address.contains(':') {
            format!("[{}]:{}", self.server.bind_address, self.server.dns_port)
        } else {
            format!("{}:{}", self.server.bind_address, self.server.dns_port)
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub max_concurrent_queries: Option<usize>,
    pub upstream: Option<String>,
    pub query_timeout_ms: Option<u64>,
    pub strict_record_types: bool,
    pub log_level: Option<String>,
}
