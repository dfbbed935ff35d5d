//! Week-by-week browsing of the history.

use chrono::NaiveDate;
use routelog_core::{recent_week_keys, week_label, CoreError, HistoryRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSummary {
    pub week_key: String,
    pub label: String,
    pub trips: usize,
}

/// The current week and the `count - 1` before it, newest first, with the
/// number of recorded trips in each.
///
/// # Errors
///
/// Returns [`CoreError::InvalidWeekKey`] only if a generated key fails to
/// render, which would indicate a calendar overflow.
pub fn week_summaries(
    today: NaiveDate,
    count: usize,
    records: &[HistoryRecord],
) -> Result<Vec<WeekSummary>, CoreError> {
    recent_week_keys(today, count)
        .map(|week_key| -> Result<WeekSummary, CoreError> {
            let label = week_label(&week_key)?;
            let trips = records.iter().filter(|r| r.week_key == week_key).count();
            Ok(WeekSummary {
                week_key,
                label,
                trips,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use routelog_core::Distance;

    use super::*;

    #[test]
    fn counts_trips_per_recent_week() {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        let last_week = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        let records = vec![
            HistoryRecord::new("A", "B", Distance::from_number("1"), monday),
            HistoryRecord::new("A", "B", Distance::from_number("1"), monday),
            HistoryRecord::new("C", "D", Distance::from_number("2"), last_week),
        ];

        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let weeks = week_summaries(today, 3, &records).unwrap();

        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[0].week_key, "2026-10-12");
        assert_eq!(weeks[0].label, "12/10 - 17/10");
        assert_eq!(weeks[0].trips, 2);
        assert_eq!(weeks[1].trips, 1);
        assert_eq!(weeks[2].trips, 0);
    }
}
