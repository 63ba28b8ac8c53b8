/// Point-in-time copy of the canary counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub accepted: u64,
    pub rejected: u64,
    pub malformed: u64,
    /// Accepted hits per lowercased query name, sorted by name.
    pub queries_by_name: Vec<(String, u64)>,
}

impl MetricsSnapshot {
    pub fn query_count(&self, name: &str) -> Option<u64> {
        self.queries_by_name
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, count)| *count)
    }
}
