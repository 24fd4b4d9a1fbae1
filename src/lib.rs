#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Percentile group aggregation keyed by recipient, zip, and year.
pub mod aggregator;
/// Command-line runner shared by the binary.
pub mod app;
/// Percentile and run configuration.
pub mod config;
/// Fixed record layout constants.
pub mod constants;
/// Record, key, and output types.
pub mod data;
/// Repeat-donor detection.
pub mod history;
/// Run counters.
pub mod metrics;
pub mod parse;
/// Two-heap running percentile.
pub mod percentile;
/// Per-record dispatch through history and aggregation.
pub mod processor;
/// Input/output transports (filesystem today).
pub mod transport;
/// Shared type aliases.
pub mod types;

mod errors;

pub use aggregator::PercentileAggregator;
pub use config::{Percentile, PipelineConfig};
pub use data::{
    Classification, ContributionRecord, DonorIdentity, GroupKey, GroupSnapshot, OutputLine,
};
pub use errors::{PipelineError, RecordError};
pub use history::DonorHistory;
pub use metrics::IngestStats;
pub use parse::parse_record;
pub use percentile::{GroupStats, RunningPercentile};
pub use processor::RecordProcessor;
pub use types::{Amount, DonorName, LineNumber, RecipientId, Total, Year, ZipCode};
