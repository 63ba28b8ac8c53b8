use canary_dns_application::ports::QueryMetricsPort;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<dyn QueryMetricsPort>,
}
