use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::PipelineError;

/// Percentile used for every group during a run, in the range (0, 100].
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Percentile(f64);

impl Percentile {
    /// Validate and wrap a percentile value.
    pub fn new(value: f64) -> Result<Self, PipelineError> {
        if !value.is_finite() || value <= 0.0 || value > 100.0 {
            return Err(PipelineError::Configuration(format!(
                "percentile must be in (0, 100], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Read the percentile from the first line of `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| PipelineError::path(path, err))?;
        let mut first_line = String::new();
        BufReader::new(file)
            .read_line(&mut first_line)
            .map_err(|err| PipelineError::path(path, err))?;
        first_line.parse()
    }

    /// Raw percentile value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Nearest-rank position (1-based) of this percentile among `count` values.
    ///
    /// Always within `[1, count]` when `count > 0`; `0` for an empty set.
    pub fn ordinal_rank(self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        // Multiply first: 30.0 * 10 / 100 is exactly 3, 0.3 * 10 is not.
        let rank = (self.0 * count as f64 / 100.0).ceil() as usize;
        rank.clamp(1, count)
    }
}

impl FromStr for Percentile {
    type Err = PipelineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let value = trimmed.parse::<f64>().map_err(|_| {
            PipelineError::Configuration(format!("could not parse percentile '{trimmed}'"))
        })?;
        Self::new(value)
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// File locations for a single run.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Pipe-delimited contribution records.
    pub input: PathBuf,
    /// File whose first line holds the percentile.
    pub percentile_path: PathBuf,
    /// Destination for repeat-donation lines (created or truncated).
    pub output: PathBuf,
}
