use chrono::NaiveTime;

use conserje_core::calendar::{parse_manual, CalendarDate};

use crate::error::AppError;

/// Accepts a date as either the calendar's canonical `YYYY-MM-DD` key or
/// the hand-typed `d/m/y` form.
pub fn parse_date_text(input: &str, today: CalendarDate) -> Result<CalendarDate, AppError> {
    let trimmed = input.trim();
    if trimmed.contains('-') {
        Ok(CalendarDate::parse_key(trimmed)?)
    } else {
        Ok(parse_manual(trimmed, today)?)
    }
}

/// Parses an `HH:MM` slot boundary.
pub fn parse_time(input: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| AppError::InvalidTime(input.to_string()))
}
