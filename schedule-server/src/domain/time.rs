//! Wall-clock time handling for timetable data.
//!
//! Timetables give stop times as "HH:MM" strings with no date attached. A
//! train's schedule is assumed to fall within one service day; crossing
//! midnight is only ever handled by the explicit rollover rule in
//! [`ClockTime::minutes_until`].

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minutes in one day, used for midnight rollover.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day at minute resolution, with no date.
///
/// # Examples
///
/// ```
/// use schedule_server::domain::ClockTime;
///
/// let time = ClockTime::parse_hhmm("07:30").unwrap();
/// assert_eq!(time.to_string(), "07:30");
/// assert_eq!(time.minutes_since_midnight(), 450);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from hour and minute components.
    ///
    /// Returns `None` if the hour is not 0-23 or the minute is not 0-59.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Create a time from minutes since midnight, wrapping at 24 hours.
    pub fn from_minutes(minutes: u32) -> Self {
        let minutes = minutes % MINUTES_PER_DAY;
        // In range by construction: hour < 24, minute < 60
        Self(NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// A single-digit hour ("7:05") is accepted, the minute must always be
    /// two digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    /// assert!(ClockTime::parse_hhmm("7:05").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("0730").is_err());
    /// assert!(ClockTime::parse_hhmm("07:3").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        let (hour, minute) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        if hour.is_empty() || hour.len() > 2 {
            return Err(TimeError::new("hour must be one or two digits"));
        }
        if minute.len() != 2 {
            return Err(TimeError::new("minute must be two digits"));
        }

        let hour = parse_digits(hour).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_digits(minute).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the number of minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Minutes from `self` until `later`.
    ///
    /// If `later` is numerically earlier than `self`, it is taken to be on
    /// the following day.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::ClockTime;
    ///
    /// let a = ClockTime::parse_hhmm("23:50").unwrap();
    /// let b = ClockTime::parse_hhmm("00:20").unwrap();
    /// assert_eq!(a.minutes_until(b), 30);
    /// assert_eq!(b.minutes_until(a), 1410);
    /// ```
    pub fn minutes_until(&self, later: ClockTime) -> u32 {
        let start = self.minutes_since_midnight();
        let mut end = later.minutes_since_midnight();
        if end < start {
            end += MINUTES_PER_DAY;
        }
        end - start
    }

    /// Absolute difference in minutes within the same day (no rollover).
    pub fn abs_diff_minutes(&self, other: ClockTime) -> u32 {
        self.minutes_since_midnight()
            .abs_diff(other.minutes_since_midnight())
    }

    /// Subtract minutes, stopping at midnight rather than wrapping.
    pub fn saturating_sub_minutes(&self, minutes: u32) -> ClockTime {
        Self::from_minutes(self.minutes_since_midnight().saturating_sub(minutes))
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hhmm(s)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_hhmm(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse one or two ASCII digits into a u32.
fn parse_digits(s: &str) -> Option<u32> {
    s.chars()
        .try_fold(0u32, |acc, c| c.to_digit(10).map(|d| acc * 10 + d))
}
