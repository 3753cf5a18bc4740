//! Calendar-day primitives.
//!
//! Dates are day-granular with no time-of-day component. Ordering is defined
//! on the calendar value, never on the textual form.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical textual format for dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("malformed date {0:?}: expected YYYY-MM-DD")]
    Malformed(String),
    #[error("date {date} outside supported range {min}..={max}")]
    OutOfBounds {
        date: CalendarDate,
        min: CalendarDate,
        max: CalendarDate,
    },
}

/// A single calendar day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Builds a date from year/month/day, returning `None` for impossible days.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the canonical `YYYY-MM-DD` form.
    ///
    /// Surrounding whitespace is tolerated; anything that does not round-trip
    /// through [`DATE_FORMAT`] is rejected.
    pub fn parse(text: &str) -> Result<Self, DateError> {
        let trimmed = text.trim();
        let malformed = || DateError::Malformed(text.to_string());
        let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| malformed())?;
        // chrono accepts unpadded fields ("1939-9-1"); the canonical form does not.
        if date.format(DATE_FORMAT).to_string() != trimmed {
            return Err(malformed());
        }
        Ok(Self(date))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Inclusive calendar range accepted by the date picker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: CalendarDate,
    pub max: CalendarDate,
}

impl DateBounds {
    pub fn new(min: CalendarDate, max: CalendarDate) -> Self {
        Self { min, max }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date >= self.min && date <= self.max
    }

    /// Clamps `date` into the range. Assumes `is_ordered()`.
    pub fn clamp(&self, date: CalendarDate) -> CalendarDate {
        date.max(self.min).min(self.max)
    }

    pub fn check(&self, date: CalendarDate) -> Result<CalendarDate, DateError> {
        if self.contains(date) {
            Ok(date)
        } else {
            Err(DateError::OutOfBounds {
                date,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for DateBounds {
    fn default() -> Self {
        Self {
            min: CalendarDate(ymd(1800, 1, 1)),
            max: CalendarDate(ymd(2025, 12, 31)),
        }
    }
}

// Only called with literal, known-valid days.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
