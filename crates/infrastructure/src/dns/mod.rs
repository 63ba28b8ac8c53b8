pub mod metrics;

pub use metrics::QueryMetrics;
