use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::canary::CanaryConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::wire::SoaTimers;

/// Everything `canary-dns` reads at startup. Every section is optional in the file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Listener configuration (ports, bind address)
    pub server: ServerConfig,

    /// Monitored domains and SOA nameserver
    pub canary: CanaryConfig,

    /// Timers of the synthetic SOA record
    pub soa: SoaTimers,

    /// Console log level and output format
    pub logging: LoggingConfig,
}

/// Searched in order when no `--config` path is given.
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["canary-dns.toml", "/etc/canary-dns/config.toml"];

impl Config {
    /// Reads `path`, or the first existing default location, or falls back to
    /// built-in defaults; then layers the CLI values on top.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let source = path.or_else(|| {
            DEFAULT_CONFIG_PATHS
                .into_iter()
                .find(|candidate| Path::new(candidate).exists())
        });

        let mut config = match source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(port) = overrides.metrics_port {
            self.server.metrics_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(name_server) = overrides.name_server {
            self.canary.name_server = name_server;
        }
        if !overrides.allowed_domains.is_empty() {
            self.canary.allowed_domains = overrides.allowed_domains;
        }
    }

    /// Checks everything the listeners need before any socket is opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if self.server.metrics_port == 0 {
            return Err(ConfigError::Validation(
                "Metrics port cannot be 0".to_string(),
            ));
        }

        self.canary.allowed_names()?;
        self.canary.soa_record(self.soa)?;
        Ok(())
    }
}

/// Values given on the command line. `None`/empty leaves the file value alone.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub name_server: Option<String>,
    pub allowed_domains: Vec<String>,
}
