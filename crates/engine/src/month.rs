//! Calendar year-month used to bucket expenses and budgets.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A calendar year-month, the `YYYY-MM` of the wire format.
///
/// Budgets are set per month and summaries target one month; this type keeps
/// those in a validated form instead of passing raw strings around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month, validating `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidDate(format!(
                "invalid month: {month}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The calendar year of this month.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The month number, `1..=12`.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns `true` if `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = EngineError;

    /// Parses the wire format `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidDate(format!("invalid month: {s}"));

        let trimmed = s.trim();
        let (year_str, month_str) = trimmed.split_once('-').ok_or_else(invalid)?;
        if year_str.len() != 4 || month_str.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        Month::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Month {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_wire_format() {
        let month: Month = "2024-01".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 1);
        assert_eq!(month.to_string(), "2024-01");
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["2024", "2024-13", "2024-00", "24-01", "2024-1", "2024-xx", ""] {
            assert!(raw.parse::<Month>().is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn contains_matches_year_and_month() {
        let month: Month = "2024-01".parse().unwrap();
        let inside = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let next_month = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let prev_year = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert!(month.contains(inside));
        assert!(!month.contains(next_month));
        assert!(!month.contains(prev_year));
    }
}
