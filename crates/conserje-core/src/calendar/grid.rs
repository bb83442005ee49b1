use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{CalendarDate, DateError};

/// One cell of the booking calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    date: CalendarDate,
    in_month: bool,
}

impl DayCell {
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// Whether the cell belongs to the reference month, as opposed to the
    /// padding drawn from the neighbouring months.
    pub fn in_month(&self) -> bool {
        self.in_month
    }

    pub fn key(&self) -> String {
        self.date.key()
    }
}

/// A fixed 6-week window over a reference month: always 42 cells, starting
/// on the Sunday of the week containing day 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub const CELLS: usize = 42;

    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::ComponentOutOfRange("month"));
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(DateError::ComponentOutOfRange("year"))?;

        let lead = first.weekday().num_days_from_sunday() as i64;
        let start = first - Duration::days(lead);

        let cells = (0..Self::CELLS as i64)
            .map(|offset| {
                let date = start + Duration::days(offset);
                DayCell {
                    date: CalendarDate::from_naive(date),
                    in_month: date.year() == year && date.month() == month,
                }
            })
            .collect();

        Ok(Self { year, month, cells })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Grid for the previous month, for the `<` navigation button.
    pub fn prev(&self) -> Result<Self, DateError> {
        match self.month {
            1 => Self::new(self.year - 1, 12),
            m => Self::new(self.year, m - 1),
        }
    }

    /// Grid for the next month, for the `>` navigation button.
    pub fn next(&self) -> Result<Self, DateError> {
        match self.month {
            12 => Self::new(self.year + 1, 1),
            m => Self::new(self.year, m + 1),
        }
    }
}
