//! Monday-aligned week arithmetic.
//!
//! The ledger is partitioned by the Monday that opens each week. Sunday is
//! treated as the tail of the week that started six days earlier, never as the
//! start of the next one.

use chrono::{Datelike, Days, NaiveDate};

use crate::CoreError;

/// `chrono` format of a week key (`YYYY-MM-DD`).
pub const WEEK_KEY_FORMAT: &str = "%Y-%m-%d";

/// `chrono` format of a record's entry date.
pub const ENTRY_DATE_FORMAT: &str = "%d/%m/%Y";

const SHORT_DATE_FORMAT: &str = "%d/%m";

/// Returns the Monday of the week containing `date`.
///
/// Sunday maps back six days, so it lands on the preceding Monday.
#[must_use]
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday();
    date - Days::new(u64::from(back))
}

/// Renders the week key (`YYYY-MM-DD` of the Monday) for `date`.
#[must_use]
pub fn week_key_of(date: NaiveDate) -> String {
    monday_of(date).format(WEEK_KEY_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` string and snaps it to the Monday of its week.
///
/// # Errors
///
/// Returns [`CoreError::InvalidWeekKey`] if `key` is not a valid ISO date.
pub fn parse_week_key(key: &str) -> Result<NaiveDate, CoreError> {
    let date = NaiveDate::parse_from_str(key.trim(), WEEK_KEY_FORMAT).map_err(|_| {
        CoreError::InvalidWeekKey {
            key: key.to_string(),
        }
    })?;
    Ok(monday_of(date))
}

/// Display label for a week: `"<Monday> - <Saturday>"` as `dd/mm`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidWeekKey`] if `week_key` does not parse.
pub fn week_label(week_key: &str) -> Result<String, CoreError> {
    let monday = parse_week_key(week_key)?;
    let saturday = monday + Days::new(5);
    Ok(format!(
        "{} - {}",
        monday.format(SHORT_DATE_FORMAT),
        saturday.format(SHORT_DATE_FORMAT)
    ))
}

/// Keys of the week containing `today` and the `count - 1` weeks before it,
/// most recent first.
pub fn recent_week_keys(today: NaiveDate, count: usize) -> impl Iterator<Item = String> {
    let current = monday_of(today);
    (0..count as u64).map_while(move |weeks_back| {
        current
            .checked_sub_days(Days::new(weeks_back * 7))
            .map(|monday| monday.format(WEEK_KEY_FORMAT).to_string())
    })
}
