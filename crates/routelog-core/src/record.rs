use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::distance::Distance;
use crate::week::{week_key_of, ENTRY_DATE_FORMAT};

/// Days of the six-day labor week. There is no Sunday bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaborDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl LaborDay {
    /// Fixed export order.
    pub const ALL: [LaborDay; 6] = [
        LaborDay::Monday,
        LaborDay::Tuesday,
        LaborDay::Wednesday,
        LaborDay::Thursday,
        LaborDay::Friday,
        LaborDay::Saturday,
    ];

    /// Maps a calendar weekday onto the labor week; Sunday folds into Saturday.
    #[must_use]
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => LaborDay::Monday,
            Weekday::Tue => LaborDay::Tuesday,
            Weekday::Wed => LaborDay::Wednesday,
            Weekday::Thu => LaborDay::Thursday,
            Weekday::Fri => LaborDay::Friday,
            Weekday::Sat | Weekday::Sun => LaborDay::Saturday,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LaborDay::Monday => "Monday",
            LaborDay::Tuesday => "Tuesday",
            LaborDay::Wednesday => "Wednesday",
            LaborDay::Thursday => "Thursday",
            LaborDay::Friday => "Friday",
            LaborDay::Saturday => "Saturday",
        }
    }
}

impl std::fmt::Display for LaborDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One logged trip. Never mutated after creation; only removed whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub origin: String,
    pub destination: String,
    pub distance: Distance,
    pub entry_date: String,
    pub weekday: LaborDay,
    pub week_key: String,
}

impl HistoryRecord {
    /// Creates a fresh record dated `today` with a new id.
    ///
    /// `origin` and `destination` are trimmed but keep their casing.
    #[must_use]
    pub fn new(origin: &str, destination: &str, distance: Distance, today: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            distance,
            entry_date: today.format(ENTRY_DATE_FORMAT).to_string(),
            weekday: LaborDay::from_weekday(today.weekday()),
            week_key: week_key_of(today),
        }
    }

    /// Case-insensitive comparison of both route ends.
    #[must_use]
    pub fn matches_route(&self, origin: &str, destination: &str) -> bool {
        self.origin.to_lowercase() == origin.trim().to_lowercase()
            && self.destination.to_lowercase() == destination.trim().to_lowercase()
    }
}
