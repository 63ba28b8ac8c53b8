//! Canary DNS Domain Layer
//!
//! DNS wire codec (labels, names, records, messages) and configuration.
pub mod config;
pub mod errors;
pub mod query_stats;
pub mod record_type;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::WireError;
pub use query_stats::MetricsSnapshot;
pub use record_type::{Opcode, RecordClass, RecordType};
pub use wire::{
    build_soa, DecodedName, Label, Message, Name, Question, RecordData, RecordInstance,
    ResourceRecord, SoaData, SoaTimers, SuffixMatch,
};
