pub mod availability;
pub mod grid;
pub mod parse;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use availability::DateConstraints;
pub use grid::{DayCell, MonthGrid};
pub use parse::parse_manual;

/// Why a date input was rejected. Each variant maps to a message the
/// dashboard shows next to the date field.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    #[error("invalid date format, expected dd/mm/yyyy")]
    InvalidFormat,
    #[error("date {0} is out of range")]
    ComponentOutOfRange(&'static str),
    #[error("day does not exist in that month")]
    NonexistentDate,
    #[error("date is in the past")]
    PastDate,
    #[error("date is before the earliest allowed date")]
    BeforeMinimum,
    #[error("date is after the latest allowed date")]
    AfterMaximum,
    #[error("that weekday is not available")]
    WeekdayUnavailable,
}

/// A plain calendar day. Two values compare by calendar position only;
/// the clock instant they were derived from never matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::ComponentOutOfRange("month"));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::NonexistentDate)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Strips the time-of-day from an instant.
    pub fn from_instant(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    /// Canonical `YYYY-MM-DD` lookup key.
    pub fn key(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    pub fn parse_key(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateError::InvalidFormat)
    }

    /// Zero-padded `dd/mm/yyyy`, the form shown in the dashboard.
    pub fn display_dmy(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// 0 = Sunday .. 6 = Saturday.
    pub fn weekday_index(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }

    /// The instant at the given wall time on this day.
    pub fn at(&self, time: NaiveTime) -> DateTime<Utc> {
        self.0.and_time(time).and_utc()
    }

    pub fn plus_days(&self, days: u64) -> Self {
        Self(self.0.checked_add_days(chrono::Days::new(days)).unwrap_or(self.0))
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
