//! Weekly export view: one section per labor day, in a fixed order.

use routelog_core::{HistoryRecord, LaborDay};
use serde::Serialize;

use crate::error::ExportError;

/// Placeholder text for a day with no trips.
pub const NO_ROUTES: &str = "No routes";

/// One spreadsheet row. Field names are the column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "DAY")]
    pub day: String,
    #[serde(rename = "ORIGIN")]
    pub origin: String,
    #[serde(rename = "DESTINATION")]
    pub destination: String,
    #[serde(rename = "KM")]
    pub km: String,
}

impl ExportRow {
    fn section(day: LaborDay) -> Self {
        Self {
            day: day.name().to_uppercase(),
            ..Self::blank()
        }
    }

    fn placeholder() -> Self {
        Self {
            origin: NO_ROUTES.to_string(),
            ..Self::blank()
        }
    }

    fn entry(record: &HistoryRecord) -> Self {
        Self {
            day: record.entry_date.clone(),
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            km: record.distance.to_string(),
        }
    }

    fn blank() -> Self {
        Self {
            day: String::new(),
            origin: String::new(),
            destination: String::new(),
            km: String::new(),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self == &Self::blank()
    }
}

/// Rows for `week_key`, grouped Monday..Saturday regardless of store order.
///
/// Each day gets a header row, then its records in store order (or a single
/// [`NO_ROUTES`] row), then a blank separator.
///
/// # Errors
///
/// Returns [`ExportError::EmptyWeek`] if no record belongs to the week, so
/// callers never emit an empty file.
pub fn group_for_export(
    week_key: &str,
    records: &[HistoryRecord],
) -> Result<Vec<ExportRow>, ExportError> {
    let in_week: Vec<&HistoryRecord> = records.iter().filter(|r| r.week_key == week_key).collect();
    if in_week.is_empty() {
        return Err(ExportError::EmptyWeek {
            week_key: week_key.to_string(),
        });
    }

    let mut rows = Vec::with_capacity(in_week.len() + LaborDay::ALL.len() * 3);
    for day in LaborDay::ALL {
        rows.push(ExportRow::section(day));
        let before = rows.len();
        rows.extend(
            in_week
                .iter()
                .filter(|r| r.weekday == day)
                .map(|r| ExportRow::entry(r)),
        );
        if rows.len() == before {
            rows.push(ExportRow::placeholder());
        }
        rows.push(ExportRow::blank());
    }
    Ok(rows)
}

/// Spreadsheet file name for a week.
#[must_use]
pub fn export_filename(week_key: &str) -> String {
    format!("routes-{week_key}.csv")
}
