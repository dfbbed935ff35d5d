//! Extraction of a kilometre figure from free-form estimator text.
//!
//! The estimator answers in natural language, so everything fragile about that
//! contract stays behind [`parse_distance`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static NUMBER_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*km").expect("valid number-with-unit regex")
});

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("valid bare number regex"));

/// A distance as stored in the ledger, always rendered `"<number> km"` with a
/// `.` decimal separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(String);

impl Distance {
    /// Builds a distance from a numeric token, normalising `,` to `.`.
    #[must_use]
    pub fn from_number(number: &str) -> Self {
        Self(format!("{} km", number.trim().replace(',', ".")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric part without the unit suffix.
    #[must_use]
    pub fn number(&self) -> &str {
        self.0.strip_suffix(" km").unwrap_or(&self.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pulls the first distance out of an estimator reply.
///
/// Prefers a number directly followed by `km`; otherwise takes the first bare
/// number. Returns `None` when the text has no digits at all.
#[must_use]
pub fn parse_distance(text: &str) -> Option<Distance> {
    if let Some(caps) = NUMBER_WITH_UNIT.captures(text) {
        return caps.get(1).map(|m| Distance::from_number(m.as_str()));
    }
    BARE_NUMBER
        .find(text)
        .map(|m| Distance::from_number(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_decimal_is_normalised() {
        let d = parse_distance("La distancia es 5,4 km").expect("should parse");
        assert_eq!(d.as_str(), "5.4 km");
    }

    #[test]
    fn number_attached_to_unit() {
        assert_eq!(parse_distance("about 312km by road").unwrap().as_str(), "312 km");
    }

    #[test]
    fn unit_match_wins_over_earlier_number() {
        let d = parse_distance("Route 66 is roughly 12.5 KM from here").unwrap();
        assert_eq!(d.as_str(), "12.5 km");
    }

    #[test]
    fn falls_back_to_first_bare_number() {
        let d = parse_distance("Approximately 47 kilometres").unwrap();
        assert_eq!(d.as_str(), "47 km");
        assert_eq!(parse_distance("answer: 8,25").unwrap().as_str(), "8.25 km");
    }

    #[test]
    fn no_digits_yields_none() {
        assert!(parse_distance("I cannot determine that distance.").is_none());
        assert!(parse_distance("").is_none());
    }

    #[test]
    fn number_strips_suffix() {
        assert_eq!(Distance::from_number("5,4").number(), "5.4");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Distance::from_number("7")).unwrap();
        assert_eq!(json, "\"7 km\"");
    }
}
