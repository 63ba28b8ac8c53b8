use crate::state::AppState;
use axum::{extract::State, http::header, response::IntoResponse};
use canary_dns_domain::MetricsSnapshot;
use std::fmt::Write;
use tracing::{debug, instrument};

/// Prometheus text exposition, version 0.0.4.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

#[instrument(skip(state), name = "api_get_metrics")]
pub async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.snapshot();

    debug!(
        accepted = snapshot.accepted,
        rejected = snapshot.rejected,
        malformed = snapshot.malformed,
        names = snapshot.queries_by_name.len(),
        "Serving metrics"
    );

    ([(header::CONTENT_TYPE, CONTENT_TYPE)], render_metrics(&snapshot))
}

pub fn render_metrics(snapshot: &MetricsSnapshot) -> String {
    let mut body = String::with_capacity(256 + snapshot.queries_by_name.len() * 64);

    for (metric, value) in [
        ("dns_accepted_count", snapshot.accepted),
        ("dns_rejected_count", snapshot.rejected),
        ("dns_malformed_count", snapshot.malformed),
    ] {
        // Writing to a String cannot fail.
        let _ = writeln!(body, "# TYPE {metric} counter");
        let _ = writeln!(body, "{metric} {value}");
    }

    body.push_str("# TYPE dns_query_count counter\n");
    for (name, count) in &snapshot.queries_by_name {
        let _ = writeln!(body, "dns_query_count{{name=\"{}\"}} {count}", escape_label(name));
    }

    body
}

fn escape_label(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
