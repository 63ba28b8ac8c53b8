mod builders;
mod log_capture;
mod mock_metrics;

pub use builders::*;
pub use log_capture::*;
pub use mock_metrics::*;
