use canary_dns_domain::{CliOverrides, Config};
use tracing::info;

/// Reads the config file (if any) and layers the CLI values on top.
/// Validation is left to the caller.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    Ok(Config::load(path, overrides)?)
}

/// Logged once the subscriber is installed; loading happens before it exists.
pub fn log_config(config: &Config) {
    info!(
        name_server = %config.canary.name_server,
        allowed_domains = ?config.canary.allowed_domains,
        "Canary configuration"
    );
    info!(
        bind_address = %config.server.bind_address,
        dns_port = config.server.dns_port,
        metrics_port = config.server.metrics_port,
        soa_serial = config.soa.serial,
        "Listener configuration"
    );
}
