use crate::calendar::{CalendarDate, DAYS_IN_MONTH};
use crate::error::{Error, ErrorKind, Result};

/// Holds the date the calendar is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    current: CalendarDate,
}

impl Clock {
    pub fn new(current: CalendarDate) -> Self {
        Clock { current }
    }

    pub fn current(&self) -> CalendarDate {
        self.current
    }

    pub fn advance(&mut self, days: i64) -> CalendarDate {
        self.current = self.current.advance(days);
        self.current
    }

    pub fn retreat(&mut self, days: i64) -> CalendarDate {
        self.current = self.current.retreat(days);
        self.current
    }

    /// Moves to `day` of the displayed month.
    pub fn jump_to_day(&mut self, day: u32) -> Result<CalendarDate> {
        if !(1..=DAYS_IN_MONTH).contains(&day) {
            return Err(Error::new(
                ErrorKind::DayOutOfRange,
                &format!("day {} is not between 1 and {}", day, DAYS_IN_MONTH),
            ));
        }

        Ok(self.advance(day as i64 - self.current.day() as i64))
    }
}
