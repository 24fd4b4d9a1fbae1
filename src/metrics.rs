use std::collections::BTreeMap;

use crate::errors::RecordError;
use crate::types::LineNumber;

/// Counters collected over one ingestion run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Input lines seen, valid or not.
    pub lines_read: LineNumber,
    /// Output lines produced.
    pub emitted: u64,
    /// Valid records that registered a new donor.
    pub new_donors: u64,
    /// Skipped records keyed by `RecordError::kind`.
    pub skipped_by_kind: BTreeMap<&'static str, u64>,
}

impl IngestStats {
    /// Count a skipped record.
    pub fn record_skip(&mut self, error: &RecordError) {
        *self.skipped_by_kind.entry(error.kind()).or_insert(0) += 1;
    }

    /// Total number of skipped records.
    pub fn skipped(&self) -> u64 {
        self.skipped_by_kind.values().sum()
    }

    /// Skips for one error kind.
    pub fn skipped_for(&self, kind: &str) -> u64 {
        self.skipped_by_kind.get(kind).copied().unwrap_or(0)
    }

    /// Fraction of lines that produced output.
    pub fn emit_ratio(&self) -> f64 {
        if self.lines_read == 0 {
            0.0
        } else {
            self.emitted as f64 / self.lines_read as f64
        }
    }
}
