use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Year;

/// Reasons a single input record is dropped.
///
/// None of these stop a run: the offending record is skipped and processing
/// resumes with the next line.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record has only {fields} fields")]
    TruncatedRecord { fields: usize },
    #[error("required field '{field}' is empty")]
    MissingRequiredField { field: &'static str },
    #[error("invalid zip code '{0}'")]
    InvalidZip(String),
    #[error("invalid transaction date '{0}'")]
    InvalidDate(String),
    #[error("invalid transaction amount '{0}'")]
    InvalidAmount(String),
    #[error("line is not valid UTF-8 (first bad byte at offset {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },
    #[error("OTHER_ID field is set; contributor is not an individual")]
    DisqualifyingOtherId,
    #[error("record year {year} precedes donor's first-seen year {first_seen}")]
    StaleDonorYear { year: Year, first_seen: Year },
}

impl RecordError {
    /// Stable label used for logging and skip accounting.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::TruncatedRecord { .. } => "truncated_record",
            RecordError::MissingRequiredField { .. } => "missing_required_field",
            RecordError::InvalidZip(_) => "invalid_zip",
            RecordError::InvalidDate(_) => "invalid_date",
            RecordError::InvalidAmount(_) => "invalid_amount",
            RecordError::InvalidEncoding { .. } => "invalid_encoding",
            RecordError::DisqualifyingOtherId => "disqualifying_other_id",
            RecordError::StaleDonorYear { .. } => "stale_donor_year",
        }
    }
}

/// Error type for configuration and IO failures that abort a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("cannot access '{path}': {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl PipelineError {
    pub(crate) fn path(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PipelineError::Path {
            path: path.into(),
            source,
        }
    }
}
