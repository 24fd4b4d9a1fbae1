use std::fmt;

use crate::constants::OUTPUT_DELIMITER;
use crate::types::{Amount, DonorName, RecipientId, Total, Year, ZipCode};

/// A parsed and validated individual contribution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContributionRecord {
    /// Recipient committee.
    pub recipient_id: RecipientId,
    /// Donor name, verbatim.
    pub donor_name: DonorName,
    /// Five-digit zip prefix of the donor.
    pub zip: ZipCode,
    /// Calendar year of the transaction date.
    pub year: Year,
    /// Rounded transaction amount.
    pub amount: Amount,
}

impl ContributionRecord {
    /// Key used for repeat-donor detection.
    pub fn donor(&self) -> DonorIdentity {
        DonorIdentity {
            name: self.donor_name.clone(),
            zip: self.zip.clone(),
        }
    }

    /// Key of the group this record aggregates into.
    pub fn group(&self) -> GroupKey {
        GroupKey {
            recipient_id: self.recipient_id.clone(),
            zip: self.zip.clone(),
            year: self.year,
        }
    }
}

/// Donor identity: name plus zip. Not a unique person, only a detection key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DonorIdentity {
    /// Donor name.
    pub name: DonorName,
    /// Five-digit zip prefix.
    pub zip: ZipCode,
}

/// Aggregation group: recipient, donor zip, transaction year.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    /// Recipient committee.
    pub recipient_id: RecipientId,
    /// Five-digit zip prefix.
    pub zip: ZipCode,
    /// Calendar year.
    pub year: Year,
}

/// Result of checking a record against the donor history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// First record for this donor; only the history is updated.
    NotRepeat,
    /// Donor seen before in the same or an earlier year; aggregate the record.
    Repeat,
    /// Record year precedes the donor's first-seen year; drop the record.
    Invalid {
        /// Year stored when the donor was first observed.
        first_seen: Year,
    },
}

/// Group statistics right after one ingestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupSnapshot {
    /// Nearest-rank percentile of the amounts ingested so far.
    pub percentile_value: Amount,
    /// Sum of the amounts ingested so far.
    pub total_amount: Total,
    /// Number of amounts ingested so far.
    pub count: u64,
}

/// One emitted line: `recipient|zip|year|percentile|total|count`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    /// Group the repeat donation was aggregated into.
    pub group: GroupKey,
    /// Group state after the donation.
    pub stats: GroupSnapshot,
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = OUTPUT_DELIMITER;
        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            self.group.recipient_id,
            self.group.zip,
            self.group.year,
            self.stats.percentile_value,
            self.stats.total_amount,
            self.stats.count,
        )
    }
}
