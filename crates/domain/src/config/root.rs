use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::routing::RoutingConfig;
use super::server::ServerConfig;
use super::store::StoreConfig;
use super::updater::UpdaterConfig;
use super::upstream::{parse_upstream_addr, UpstreamConfig};
use super::web::WebConfig;

/// Main configuration structure for SplitDNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server configuration (ports, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Trusted and policy resolvers
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Persistent store
    #[serde(default)]
    pub store: StoreConfig,

    /// Daily classification list update
    #[serde(default)]
    pub updater: UpdaterConfig,

    /// Routing trigger
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Management console
    #[serde(default)]
    pub web: WebConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. splitdns.toml in current directory
    /// 3. /etc/splitdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("splitdns.toml").exists() {
            Self::from_file("splitdns.toml")?
        } else if std::path::Path::new("/etc/splitdns/config.toml").exists() {
            Self::from_file("/etc/splitdns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(path) = overrides.snapshot_path {
            self.store.snapshot_path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        for (role, addr) in [
            ("trusted", &self.upstream.trusted),
            ("policy", &self.upstream.policy),
        ] {
            if parse_upstream_addr(addr).is_none() {
                return Err(ConfigError::Validation(format!(
                    "Invalid {} upstream address '{}'",
                    role, addr
                )));
            }
        }

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        if self.store.default_ttl_secs == 0 || self.store.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Store TTL and sweep interval must be positive".to_string(),
            ));
        }

        if self.updater.daily_time().is_none() {
            return Err(ConfigError::Validation(format!(
                "Invalid updater daily_at '{}', expected HH:MM",
                self.updater.daily_at
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub snapshot_path: Option<String>,
    pub log_level: Option<String>,
}
