use canary_dns_domain::MetricsSnapshot;

/// Counter store shared between the DNS listener (writer) and the metrics
/// endpoint (reader). Each call must be atomic on its own.
pub trait QueryMetricsPort: Send + Sync {
    /// One accepted question, keyed by its lowercased name.
    fn record_accepted(&self, name: &str);

    fn record_rejected(&self);

    fn record_malformed(&self);

    fn snapshot(&self) -> MetricsSnapshot;
}
