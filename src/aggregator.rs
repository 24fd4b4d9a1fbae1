use std::collections::HashMap;

use crate::config::Percentile;
use crate::data::{GroupKey, GroupSnapshot};
use crate::percentile::GroupStats;
use crate::types::Amount;

/// Running statistics for every (recipient, zip, year) group seen in a run.
#[derive(Clone, Debug)]
pub struct PercentileAggregator {
    percentile: Percentile,
    groups: HashMap<GroupKey, GroupStats>,
}

impl PercentileAggregator {
    /// Create an empty aggregator; every group uses `percentile`.
    pub fn new(percentile: Percentile) -> Self {
        Self {
            percentile,
            groups: HashMap::new(),
        }
    }

    /// Add `amount` to `group`, creating it on first use.
    pub fn record(&mut self, group: GroupKey, amount: Amount) -> GroupSnapshot {
        let percentile = self.percentile;
        self.groups
            .entry(group)
            .or_insert_with(|| GroupStats::new(percentile))
            .ingest(amount)
    }

    /// Statistics for `group`, if it has received any amount.
    pub fn get(&self, group: &GroupKey) -> Option<&GroupStats> {
        self.groups.get(group)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True before any amount was recorded.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
