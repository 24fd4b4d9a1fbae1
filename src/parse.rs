//! Tokenization and field validation for raw contribution lines.

use chrono::{Datelike, NaiveDate};

use crate::constants::{
    AMOUNT_FIELD, DATE_FIELD, DATE_LEN, FIELD_DELIMITER, MIN_FIELD_COUNT, NAME_FIELD,
    OTHER_ID_FIELD, RECIPIENT_FIELD, ZIP_FIELD, ZIP_PREFIX_LEN,
};
use crate::data::ContributionRecord;
use crate::errors::RecordError;
use crate::types::{Amount, Year, ZipCode};

/// Parse one raw input line into a validated record.
///
/// Trailing line terminators are ignored. Fields are otherwise taken verbatim.
pub fn parse_record(line: &str) -> Result<ContributionRecord, RecordError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < MIN_FIELD_COUNT {
        return Err(RecordError::TruncatedRecord {
            fields: fields.len(),
        });
    }
    if !fields[OTHER_ID_FIELD].is_empty() {
        return Err(RecordError::DisqualifyingOtherId);
    }

    let recipient_id = required(fields[RECIPIENT_FIELD], "CMTE_ID")?;
    let donor_name = required(fields[NAME_FIELD], "NAME")?;
    let zip = parse_zip(fields[ZIP_FIELD])?;
    let year = parse_year(fields[DATE_FIELD])?;
    let amount = parse_amount(fields[AMOUNT_FIELD])?;

    Ok(ContributionRecord {
        recipient_id: recipient_id.to_string(),
        donor_name: donor_name.to_string(),
        zip,
        year,
        amount,
    })
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, RecordError> {
    if value.is_empty() {
        Err(RecordError::MissingRequiredField { field })
    } else {
        Ok(value)
    }
}

/// Keep the five-digit prefix of a zip code with at least five characters.
pub fn parse_zip(raw: &str) -> Result<ZipCode, RecordError> {
    match raw.get(..ZIP_PREFIX_LEN) {
        Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => Ok(prefix.to_string()),
        _ => Err(RecordError::InvalidZip(raw.to_string())),
    }
}

/// Year of an `MMDDYYYY` date that must name a real calendar day.
pub fn parse_year(raw: &str) -> Result<Year, RecordError> {
    let invalid = || RecordError::InvalidDate(raw.to_string());
    if raw.len() != DATE_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let month = raw[0..2].parse::<u32>().map_err(|_| invalid())?;
    let day = raw[2..4].parse::<u32>().map_err(|_| invalid())?;
    let year = raw[4..8].parse::<i32>().map_err(|_| invalid())?;
    if year < 1 {
        return Err(invalid());
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|date| date.year())
        .ok_or_else(invalid)
}

/// Parse a decimal amount and round it to whole dollars, ties to even.
pub fn parse_amount(raw: &str) -> Result<Amount, RecordError> {
    let invalid = || RecordError::InvalidAmount(raw.to_string());
    let value = raw.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    let rounded = value.round_ties_even();
    if rounded.abs() >= Amount::MAX as f64 {
        return Err(invalid());
    }
    Ok(rounded as Amount)
}
