use chrono::NaiveDate;

use crate::types::errors::DateError;

/// Wire format of every ledger date (`data` fields, range bounds).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Parses a `yyyy-mm-dd` calendar date.
///
/// Dates carry no time zone, so a stored date always lands on the same day it
/// was recorded on regardless of where it is read.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|error| {
        DateError::InvalidFormat(format!("'{value}' is not a yyyy-mm-dd date: {error}"))
    })
}

/// Formats a date the way the ledger displays it (`dd/mm/yyyy`).
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}
