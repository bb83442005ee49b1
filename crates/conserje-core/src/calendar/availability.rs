use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{CalendarDate, DateError};

/// Selection rules for a booking calendar: an optional floor and ceiling
/// plus weekdays that are never offered (0 = Sunday .. 6 = Saturday).
/// Past dates are always rejected, whether or not a minimum is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateConstraints {
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
    disabled_weekdays: BTreeSet<u8>,
}

impl DateConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min(mut self, min: CalendarDate) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: CalendarDate) -> Self {
        self.max = Some(max);
        self
    }

    pub fn disable_weekday(mut self, weekday: u8) -> Self {
        if weekday <= 6 {
            self.disabled_weekdays.insert(weekday);
        }
        self
    }

    pub fn disabled_weekdays(&self) -> &BTreeSet<u8> {
        &self.disabled_weekdays
    }

    /// First failing rule wins; the order matches how the dashboard reports
    /// rejections: past date, below minimum, above maximum, closed weekday.
    pub fn check(&self, candidate: CalendarDate, today: CalendarDate) -> Result<(), DateError> {
        if candidate < today {
            return Err(DateError::PastDate);
        }
        if let Some(min) = self.min {
            if candidate < min {
                return Err(DateError::BeforeMinimum);
            }
        }
        if let Some(max) = self.max {
            if candidate > max {
                return Err(DateError::AfterMaximum);
            }
        }
        if self.disabled_weekdays.contains(&candidate.weekday_index()) {
            return Err(DateError::WeekdayUnavailable);
        }
        Ok(())
    }

    pub fn is_selectable(&self, candidate: CalendarDate, today: CalendarDate) -> bool {
        self.check(candidate, today).is_ok()
    }
}
