use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{CalendarDate, DateError};

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2,4})$").expect("valid pattern"));

/// Parses a hand-typed `d/m/y` date. Characters other than digits and `/`
/// are stripped first, so "15 / 09 / 2026" and "15/09/2026." both work.
/// A 2-digit year is expanded with the century of `today`.
pub fn parse_manual(input: &str, today: CalendarDate) -> Result<CalendarDate, DateError> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '/')
        .collect();

    let caps = DATE_PATTERN
        .captures(&cleaned)
        .ok_or(DateError::InvalidFormat)?;

    let day: u32 = caps[1].parse().map_err(|_| DateError::InvalidFormat)?;
    let month: u32 = caps[2].parse().map_err(|_| DateError::InvalidFormat)?;
    let year_text = &caps[3];
    let mut year: i32 = year_text.parse().map_err(|_| DateError::InvalidFormat)?;
    if year_text.len() == 2 {
        year += today.year() / 100 * 100;
    }

    if !(1..=31).contains(&day) {
        return Err(DateError::ComponentOutOfRange("day"));
    }
    if !(1..=12).contains(&month) {
        return Err(DateError::ComponentOutOfRange("month"));
    }
    if !(1900..=2100).contains(&year) {
        return Err(DateError::ComponentOutOfRange("year"));
    }

    // from_ymd_opt is the round-trip check: 31/04 or 29/02 in a non-leap
    // year constructs nothing rather than sliding into the next month.
    NaiveDate::from_ymd_opt(year, month, day)
        .map(CalendarDate::from_naive)
        .ok_or(DateError::NonexistentDate)
}
