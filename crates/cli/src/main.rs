use anyhow::Context;
use canary_dns_api::AppState;
use canary_dns_application::use_cases::HandleDnsQueryUseCase;
use canary_dns_domain::CliOverrides;
use canary_dns_infrastructure::dns::QueryMetrics;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "canary-dns")]
#[command(version)]
#[command(about = "Canary DNS - answers NXDOMAIN for monitored domains and logs every query")]
struct Cli {
    /// Nameserver placed in the SOA authority record
    #[arg(value_name = "NAME_SERVER")]
    name_server: Option<String>,

    /// Domains to answer for (a query matches if it ends with one of them)
    #[arg(value_name = "ALLOWED_DOMAIN")]
    allowed_domains: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Metrics server port
    #[arg(short = 'm', long)]
    metrics_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

/// Usage errors exit with 1; help and version keep clap's handling.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => usage_error(e),
    }
}

fn usage_error(e: clap::Error) -> ! {
    let _ = e.print();
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parse_cli();

    // Load configuration
    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        metrics_port: cli.metrics_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
        name_server: cli.name_server.clone(),
        allowed_domains: cli.allowed_domains.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    // Positionals may come from the config file instead; only complain if both lack them.
    if config.canary.name_server.is_empty() || config.canary.allowed_domains.is_empty() {
        usage_error(Cli::command().error(
            ErrorKind::MissingRequiredArgument,
            "<NAME_SERVER> and at least one <ALLOWED_DOMAIN> are required",
        ));
    }
    config.validate()?;

    // Initialize logging
    bootstrap::init_logging(&config);

    info!("Starting Canary DNS v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config(&config);

    let allowed_domains: Arc<[_]> = config.canary.allowed_names()?.into();
    let soa = Arc::new(config.canary.soa_record(config.soa)?);
    let metrics = Arc::new(QueryMetrics::new());

    let app_state = AppState {
        metrics: metrics.clone(),
    };

    let dns_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.dns_port).parse()?;
    let metrics_addr: SocketAddr = format!(
        "{}:{}",
        config.server.bind_address, config.server.metrics_port
    )
    .parse()?;

    // Bind before serving metrics so a busy or privileged port aborts startup.
    let dns_socket = server::dns::create_udp_socket(dns_addr)
        .with_context(|| format!("cannot bind DNS listener on {dns_addr}"))?;
    let handler = HandleDnsQueryUseCase::new(allowed_domains, soa, metrics);
    let dns_task = tokio::spawn(server::start_dns_server(dns_socket, handler));

    // Either listener stopping ends the process.
    tokio::select! {
        joined = dns_task => {
            joined??;
            error!("DNS listener stopped");
        }
        served = server::start_web_server(metrics_addr, app_state) => {
            served?;
            error!("Metrics server stopped");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
