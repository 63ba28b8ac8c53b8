mod query_metrics;

pub use query_metrics::QueryMetricsPort;

// Re-export for convenience
pub use canary_dns_domain::MetricsSnapshot;
