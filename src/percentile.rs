//! Running nearest-rank percentile over an insertion-only stream.
//!
//! Amounts are split into two heaps around the target rank: `low` holds the
//! `ordinal_rank` smallest values (max on top) and `high` holds the rest
//! (min on top). The top of `low` is the percentile, so a query is O(1) and an
//! insertion costs one push plus at most one pop/push across the heaps.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::config::Percentile;
use crate::data::GroupSnapshot;
use crate::types::{Amount, Total};

/// Two-heap order statistic tracking `ceil(p/100 * n)`-th smallest value.
#[derive(Clone, Debug)]
pub struct RunningPercentile {
    percentile: Percentile,
    low: BinaryHeap<Amount>,
    high: BinaryHeap<Reverse<Amount>>,
}

impl RunningPercentile {
    /// Create an empty tracker for `percentile`.
    pub fn new(percentile: Percentile) -> Self {
        Self {
            percentile,
            low: BinaryHeap::new(),
            high: BinaryHeap::new(),
        }
    }

    /// Add one amount and restore `|low| == ordinal_rank(len)`.
    pub fn insert(&mut self, amount: Amount) {
        match self.low.peek() {
            Some(&low_max) if amount > low_max => self.high.push(Reverse(amount)),
            _ => self.low.push(amount),
        }

        let rank = self.percentile.ordinal_rank(self.len());
        // The rank moves by at most one per insertion, so each loop runs at most once.
        while self.low.len() > rank {
            if let Some(moved) = self.low.pop() {
                self.high.push(Reverse(moved));
            }
        }
        while self.low.len() < rank {
            match self.high.pop() {
                Some(Reverse(moved)) => self.low.push(moved),
                None => break,
            }
        }
    }

    /// Current percentile value, `None` until the first insertion.
    pub fn value(&self) -> Option<Amount> {
        self.low.peek().copied()
    }

    /// Number of amounts inserted.
    pub fn len(&self) -> usize {
        self.low.len() + self.high.len()
    }

    /// True before the first insertion.
    pub fn is_empty(&self) -> bool {
        self.low.is_empty() && self.high.is_empty()
    }

    /// Sizes of the `(low, high)` partitions.
    pub fn partition_sizes(&self) -> (usize, usize) {
        (self.low.len(), self.high.len())
    }
}

/// Per-group running total, count and percentile.
#[derive(Clone, Debug)]
pub struct GroupStats {
    total_amount: Total,
    count: u64,
    order: RunningPercentile,
}

impl GroupStats {
    /// Empty statistics for a new group.
    pub fn new(percentile: Percentile) -> Self {
        Self {
            total_amount: 0,
            count: 0,
            order: RunningPercentile::new(percentile),
        }
    }

    /// Ingest `amount` and return the updated snapshot.
    pub fn ingest(&mut self, amount: Amount) -> GroupSnapshot {
        self.total_amount += Total::from(amount);
        self.count += 1;
        self.order.insert(amount);
        GroupSnapshot {
            // Non-empty after an insert.
            percentile_value: self.order.value().unwrap_or(amount),
            total_amount: self.total_amount,
            count: self.count,
        }
    }

    /// Current snapshot, `None` before the first ingestion.
    pub fn snapshot(&self) -> Option<GroupSnapshot> {
        let percentile_value = self.order.value()?;
        Some(GroupSnapshot {
            percentile_value,
            total_amount: self.total_amount,
            count: self.count,
        })
    }

    /// Sum of ingested amounts.
    pub fn total_amount(&self) -> Total {
        self.total_amount
    }

    /// Number of ingested amounts.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Underlying order-statistic structure.
    pub fn order(&self) -> &RunningPercentile {
        &self.order
    }
}
