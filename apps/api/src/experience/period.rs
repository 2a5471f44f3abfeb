//! Month-granularity period arithmetic for job records.
//!
//! Job boundaries are stored as `"YYYY-MM"` strings in the data file. They are
//! parsed once into [`YearMonth`] and all comparisons and month counts happen on
//! the structured value. Display labels ("January 2020") are produced only at
//! presentation time.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("period '{0}' is not in YYYY-MM form")]
    Malformed(String),

    #[error("period '{0}' has month outside 1..=12")]
    MonthOutOfRange(String),
}

/// A calendar month. Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::MonthOutOfRange(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Parses a `"YYYY-MM"` boundary. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, PeriodError> {
        let trimmed = raw.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| PeriodError::Malformed(raw.to_string()))?;

        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(PeriodError::Malformed(raw.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodError::Malformed(raw.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodError::Malformed(raw.to_string()))?;

        Self::new(year, month)
    }

    /// The current calendar month (UTC).
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Human label, e.g. `"March 2021"`.
    pub fn label(&self) -> String {
        let name = MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize];
        format!("{name} {}", self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        YearMonth::parse(&raw).map_err(de::Error::custom)
    }
}

/// Reads an optional end boundary. Absent, `null` and `""` all mean "ongoing".
pub fn deserialize_optional_period<'de, D>(deserializer: D) -> Result<Option<YearMonth>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => YearMonth::parse(value).map(Some).map_err(de::Error::custom),
    }
}

/// Whole-month difference `12*(end.year-start.year) + (end.month-start.month)`.
/// Negative when `end` precedes `start`; callers clamp where needed.
pub fn months_between(start: YearMonth, end: YearMonth) -> i32 {
    (end.year - start.year) * 12 + (end.month as i32 - start.month as i32)
}
