use crate::wire::{build_soa, Name, ResourceRecord, SoaTimers};
use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// Which domains are monitored and which nameserver the SOA advertises.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CanaryConfig {
    #[serde(default)]
    pub name_server: String,

    #[serde(default)]
    pub allowed_domains: Vec<String>,
}

impl CanaryConfig {
    pub fn name_server_name(&self) -> Result<Name, ConfigError> {
        if self.name_server.trim().is_empty() {
            return Err(ConfigError::Validation(
                "No name server configured".to_string(),
            ));
        }
        Name::from_domain(&self.name_server).map_err(|e| {
            ConfigError::Validation(format!("Invalid name server '{}': {}", self.name_server, e))
        })
    }

    pub fn allowed_names(&self) -> Result<Vec<Name>, ConfigError> {
        if self.allowed_domains.is_empty() {
            return Err(ConfigError::Validation(
                "At least one allowed domain is required".to_string(),
            ));
        }
        self.allowed_domains
            .iter()
            .map(|domain| {
                let name = Name::from_domain(domain).map_err(|e| {
                    ConfigError::Validation(format!("Invalid allowed domain '{}': {}", domain, e))
                })?;
                // The root is a suffix of every name.
                if name.labels().iter().all(|label| label.is_null()) {
                    return Err(ConfigError::Validation(format!(
                        "Allowed domain '{}' would match every query",
                        domain
                    )));
                }
                Ok(name)
            })
            .collect()
    }

    pub fn soa_record(&self, timers: SoaTimers) -> Result<ResourceRecord, ConfigError> {
        let name_server = self.name_server_name()?;
        build_soa(&name_server, timers)
            .map_err(|e| ConfigError::Validation(format!("Cannot build SOA record: {}", e)))
    }
}
