use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::data::{Classification, DonorIdentity};
use crate::types::Year;

/// First-seen contribution year per donor identity.
///
/// Entries are created on the first valid record for an identity and never
/// changed afterwards, even when a later record carries an earlier year.
#[derive(Clone, Debug, Default)]
pub struct DonorHistory {
    first_seen: HashMap<DonorIdentity, Year>,
}

impl DonorHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a record for `donor` in `year`, registering unseen donors.
    pub fn observe(&mut self, donor: &DonorIdentity, year: Year) -> Classification {
        match self.first_seen.entry(donor.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(year);
                Classification::NotRepeat
            }
            Entry::Occupied(entry) => {
                let first_seen = *entry.get();
                if year < first_seen {
                    Classification::Invalid { first_seen }
                } else {
                    Classification::Repeat
                }
            }
        }
    }

    /// Year stored when `donor` was first observed.
    pub fn first_seen(&self, donor: &DonorIdentity) -> Option<Year> {
        self.first_seen.get(donor).copied()
    }

    /// Number of distinct donor identities observed.
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    /// True before any donor was observed.
    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }
}
