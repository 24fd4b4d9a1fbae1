/// Committee/recipient identifier as it appears in the input (`CMTE_ID`).
/// Example: `C00629618`
pub type RecipientId = String;
/// Donor name as it appears in the input, untouched.
/// Example: `PEREZ, JOHN A`
pub type DonorName = String;
/// Five-digit zip prefix.
/// Example: `90017`
pub type ZipCode = String;
/// Calendar year of a contribution.
/// Example: `2017`
pub type Year = i32;
/// Contribution amount in whole dollars after rounding.
/// Example: `250`
pub type Amount = i64;
/// Running sum of amounts; wide enough that summing any number of `Amount`s
/// from one run cannot overflow.
pub type Total = i128;
/// 1-based line number within the input stream.
pub type LineNumber = u64;
