#![allow(dead_code)]
use canary_dns_application::ports::{MetricsSnapshot, QueryMetricsPort};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct Counters {
    accepted: u64,
    rejected: u64,
    malformed: u64,
    by_name: BTreeMap<String, u64>,
}

/// In-memory metrics sink that records every call.
#[derive(Default)]
pub struct MockQueryMetrics {
    counters: Mutex<Counters>,
}

impl MockQueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted(&self) -> u64 {
        self.counters.lock().unwrap().accepted
    }

    pub fn rejected(&self) -> u64 {
        self.counters.lock().unwrap().rejected
    }

    pub fn malformed(&self) -> u64 {
        self.counters.lock().unwrap().malformed
    }

    pub fn count_for(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .unwrap()
            .by_name
            .get(name)
            .copied()
            .unwrap_or(0)
    }
}

impl QueryMetricsPort for MockQueryMetrics {
    fn record_accepted(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap();
        counters.accepted += 1;
        *counters.by_name.entry(name.to_string()).or_insert(0) += 1;
    }

    fn record_rejected(&self) {
        self.counters.lock().unwrap().rejected += 1;
    }

    fn record_malformed(&self) {
        self.counters.lock().unwrap().malformed += 1;
    }

    fn snapshot(&self) -> MetricsSnapshot {
        let counters = self.counters.lock().unwrap();
        MetricsSnapshot {
            accepted: counters.accepted,
            rejected: counters.rejected,
            malformed: counters.malformed,
            queries_by_name: counters
                .by_name
                .iter()
                .map(|(name, count)| (name.clone(), *count))
                .collect(),
        }
    }
}
