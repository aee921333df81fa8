//! Calendar-month filing periods.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::VerificationError;

/// Earliest year accepted for a filing period.
pub const MIN_PERIOD_YEAR: i32 = 1900;
/// Latest year accepted for a filing period.
pub const MAX_PERIOD_YEAR: i32 = 9998;

/// The calendar month a tax return covers, e.g. `2024-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FilingPeriod {
    first_day: NaiveDate,
}

impl FilingPeriod {
    /// Create a period from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Result<Self, VerificationError> {
        if !(MIN_PERIOD_YEAR..=MAX_PERIOD_YEAR).contains(&year) {
            return Err(VerificationError::InvalidFilingPeriod(format!(
                "year {year} outside {MIN_PERIOD_YEAR}..={MAX_PERIOD_YEAR}"
            )));
        }
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            VerificationError::InvalidFilingPeriod(format!("month {month} outside 1..=12"))
        })?;
        Ok(Self { first_day })
    }

    /// Parse a `YYYY-MM` period.
    pub fn parse(period: &str) -> Result<Self, VerificationError> {
        let invalid = || {
            VerificationError::InvalidFilingPeriod(format!(
                "'{period}' is not in YYYY-MM format"
            ))
        };
        let (year, month) = period.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || !(1..=2).contains(&month.len())
            || !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    /// The period containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self, VerificationError> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day - Days::new(1)
    }

    /// The following month; December rolls into January of the next year.
    pub fn next(&self) -> Self {
        Self {
            first_day: self.first_day + Months::new(1),
        }
    }

    /// Start (inclusive) and end (exclusive) of the period.
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day, self.next().first_day)
    }

    /// A filing period may not start after `today`.
    pub fn ensure_not_future(&self, today: NaiveDate) -> Result<(), VerificationError> {
        if self.first_day > today {
            return Err(VerificationError::InvalidFilingPeriod(format!(
                "{self} is in the future"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for FilingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for FilingPeriod {
    type Err = VerificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FilingPeriod {
    type Error = VerificationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FilingPeriod> for String {
    fn from(period: FilingPeriod) -> Self {
        period.to_string()
    }
}
