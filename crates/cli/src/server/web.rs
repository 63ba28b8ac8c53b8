use canary_dns_api::{create_metrics_routes, AppState};
use std::net::SocketAddr;
use tracing::info;

pub async fn start_web_server(bind_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        metrics_url = format!("http://{}/metrics", bind_addr),
        "Starting metrics server"
    );

    let app = create_metrics_routes(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Metrics server started successfully");

    axum::serve(listener, app).await?;

    Ok(())
}
