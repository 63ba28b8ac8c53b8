use canary_dns_application::ports::{MetricsSnapshot, QueryMetricsPort};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Lock-free canary counters. Clones share the same counters.
#[derive(Clone, Default)]
pub struct QueryMetrics {
    accepted: Arc<AtomicU64>,

    rejected: Arc<AtomicU64>,

    malformed: Arc<AtomicU64>,

    name_counts: Arc<DashMap<Arc<str>, u64>>,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    pub fn malformed(&self) -> u64 {
        self.malformed.load(Ordering::Relaxed)
    }

    pub fn name_count(&self, name: &str) -> u64 {
        self.name_counts.get(name).map(|v| *v).unwrap_or(0)
    }

    pub fn distinct_names(&self) -> usize {
        self.name_counts.len()
    }
}

impl QueryMetricsPort for QueryMetrics {
    fn record_accepted(&self, name: &str) {
        self.accepted.fetch_add(1, Ordering::Relaxed);

        // Fast path: the name has been seen before.
        if let Some(mut count) = self.name_counts.get_mut(name) {
            *count += 1;
            return;
        }

        self.name_counts
            .entry(Arc::from(name))
            .and_modify(|c| *c += 1)
            .or_insert(1);
        debug!(name, distinct = self.name_counts.len(), "New canary name recorded");
    }

    fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> MetricsSnapshot {
        let mut queries_by_name: Vec<(String, u64)> = self
            .name_counts
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect();
        queries_by_name.sort_by(|a, b| a.0.cmp(&b.0));

        MetricsSnapshot {
            accepted: self.accepted(),
            rejected: self.rejected(),
            malformed: self.malformed(),
            queries_by_name,
        }
    }
}
