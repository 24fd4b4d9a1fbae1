//! Fixed layout of the pipe-delimited contribution records.

/// Separator between input fields.
pub const FIELD_DELIMITER: char = '|';
/// Separator between output fields.
pub const OUTPUT_DELIMITER: char = '|';

/// Position of the recipient (`CMTE_ID`) field.
pub const RECIPIENT_FIELD: usize = 0;
/// Position of the donor name field.
pub const NAME_FIELD: usize = 7;
/// Position of the raw zip code field.
pub const ZIP_FIELD: usize = 10;
/// Position of the `MMDDYYYY` transaction date field.
pub const DATE_FIELD: usize = 13;
/// Position of the transaction amount field.
pub const AMOUNT_FIELD: usize = 14;
/// Position of the `OTHER_ID` field; non-empty means a non-individual contributor.
pub const OTHER_ID_FIELD: usize = 15;

/// Lines must reach at least the `OTHER_ID` field.
pub const MIN_FIELD_COUNT: usize = OTHER_ID_FIELD + 1;

/// Number of leading zip digits kept.
pub const ZIP_PREFIX_LEN: usize = 5;
/// Exact length of a transaction date.
pub const DATE_LEN: usize = 8;
