use tracing::debug;

use crate::aggregator::PercentileAggregator;
use crate::config::Percentile;
use crate::data::{Classification, ContributionRecord, OutputLine};
use crate::errors::RecordError;
use crate::history::DonorHistory;
use crate::metrics::IngestStats;
use crate::parse::parse_record;

/// Processing context for one ingestion pass.
///
/// Owns the donor history and the group aggregator; both grow for the
/// lifetime of the processor and are never shared. Records must be fed in
/// input order because every emitted line is a snapshot as of its record.
#[derive(Clone, Debug)]
pub struct RecordProcessor {
    history: DonorHistory,
    aggregator: PercentileAggregator,
    stats: IngestStats,
}

impl RecordProcessor {
    /// Create an empty context for `percentile`.
    pub fn new(percentile: Percentile) -> Self {
        Self {
            history: DonorHistory::new(),
            aggregator: PercentileAggregator::new(percentile),
            stats: IngestStats::default(),
        }
    }

    /// Process a validated record, returning a line for repeat donations only.
    pub fn process(&mut self, record: ContributionRecord) -> Option<OutputLine> {
        self.classify(record).ok().flatten()
    }

    /// Process a validated record.
    ///
    /// `Ok(None)` means the record registered a new donor. Records that predate
    /// the donor's first-seen year come back as `RecordError::StaleDonorYear`.
    pub fn classify(
        &mut self,
        record: ContributionRecord,
    ) -> Result<Option<OutputLine>, RecordError> {
        match self.history.observe(&record.donor(), record.year) {
            Classification::NotRepeat => {
                self.stats.new_donors += 1;
                Ok(None)
            }
            Classification::Invalid { first_seen } => Err(RecordError::StaleDonorYear {
                year: record.year,
                first_seen,
            }),
            Classification::Repeat => {
                let group = record.group();
                let stats = self.aggregator.record(group.clone(), record.amount);
                self.stats.emitted += 1;
                Ok(Some(OutputLine { group, stats }))
            }
        }
    }

    /// Parse and process one raw input line, keeping skip statistics.
    pub fn process_line(&mut self, line: &str) -> Result<Option<OutputLine>, RecordError> {
        self.stats.lines_read += 1;
        let outcome = parse_record(line).and_then(|record| self.classify(record));
        self.track(outcome)
    }

    /// Like `process_line`, for undecoded input bytes.
    ///
    /// Lines that are not valid UTF-8 are skipped as `InvalidEncoding` so that
    /// distinct names never collapse into the same identity.
    pub fn process_bytes(&mut self, line: &[u8]) -> Result<Option<OutputLine>, RecordError> {
        match std::str::from_utf8(line) {
            Ok(line) => self.process_line(line),
            Err(err) => {
                self.stats.lines_read += 1;
                self.track(Err(RecordError::InvalidEncoding {
                    valid_up_to: err.valid_up_to(),
                }))
            }
        }
    }

    fn track(
        &mut self,
        outcome: Result<Option<OutputLine>, RecordError>,
    ) -> Result<Option<OutputLine>, RecordError> {
        if let Err(err) = &outcome {
            self.stats.record_skip(err);
            debug!(
                line = self.stats.lines_read,
                kind = err.kind(),
                error = %err,
                "skipping record"
            );
        }
        outcome
    }

    /// Donor history built so far.
    pub fn history(&self) -> &DonorHistory {
        &self.history
    }

    /// Group statistics built so far.
    pub fn aggregator(&self) -> &PercentileAggregator {
        &self.aggregator
    }

    /// Run counters.
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Consume the context, keeping only the counters.
    pub fn into_stats(self) -> IngestStats {
        self.stats
    }
}
