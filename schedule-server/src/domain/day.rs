//! Day-of-week handling.
//!
//! Requests identify the day by index, 0 = Sunday through 6 = Saturday.
//! Friday is the only day that changes which trains run.

use std::fmt;

use chrono::{Datelike, Local, Weekday};

/// A day of the week on which a search is run.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceDay(u8);

impl ServiceDay {
    pub const SUNDAY: ServiceDay = ServiceDay(0);
    pub const MONDAY: ServiceDay = ServiceDay(1);
    pub const THURSDAY: ServiceDay = ServiceDay(4);
    pub const FRIDAY: ServiceDay = ServiceDay(5);
    pub const SATURDAY: ServiceDay = ServiceDay(6);

    /// Create from an index, 0 = Sunday .. 6 = Saturday.
    pub fn from_index(index: u8) -> Option<Self> {
        (index <= 6).then_some(Self(index))
    }

    /// Create from a chrono weekday.
    pub fn from_weekday(weekday: Weekday) -> Self {
        // num_days_from_sunday is always 0-6
        Self(weekday.num_days_from_sunday() as u8)
    }

    /// The current day in the server's local time zone.
    pub fn today() -> Self {
        Self::from_weekday(Local::now().weekday())
    }

    /// Returns the index, 0 = Sunday .. 6 = Saturday.
    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn is_friday(&self) -> bool {
        *self == Self::FRIDAY
    }

    /// English name of the day.
    pub fn name(&self) -> &'static str {
        match self.0 {
            0 => "Sunday",
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            _ => "Saturday",
        }
    }
}

impl fmt::Debug for ServiceDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceDay({} {})", self.0, self.name())
    }
}

impl fmt::Display for ServiceDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
