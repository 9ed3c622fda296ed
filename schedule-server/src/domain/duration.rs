//! Elapsed trip time.
//!
//! Durations are displayed as `<H>h<MM>` ("1h35") when at least an hour,
//! otherwise as `<M>min` ("45min"). Parsing goes the other way and never
//! fails: anything unreadable becomes [`TripDuration::UNKNOWN`], which sorts
//! after every real duration.
//!
//! The planner carries typed minutes throughout; [`TripDuration::parse`] is
//! for durations arriving as display strings from outside the crate.

use std::fmt;

use serde::{Serialize, Serializer};

use super::ClockTime;

/// An elapsed time in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripDuration(u32);

impl TripDuration {
    /// Sentinel for a missing or unparseable duration.
    pub const UNKNOWN: TripDuration = TripDuration(999_999);

    /// Create a duration from minutes.
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Elapsed time from `start` to `end`, rolling `end` over to the next
    /// day if it is numerically earlier than `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::{ClockTime, TripDuration};
    ///
    /// let dep = ClockTime::parse_hhmm("23:40").unwrap();
    /// let arr = ClockTime::parse_hhmm("00:25").unwrap();
    /// assert_eq!(TripDuration::between(dep, arr).minutes(), 45);
    /// ```
    pub fn between(start: ClockTime, end: ClockTime) -> Self {
        Self(start.minutes_until(end))
    }

    /// Returns the duration in minutes.
    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Returns false for the [`UNKNOWN`](Self::UNKNOWN) sentinel.
    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }

    /// Parse a `<H>h<MM>`, `<H>h` or `<M>min` string.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::TripDuration;
    ///
    /// assert_eq!(TripDuration::parse("1h35").minutes(), 95);
    /// assert_eq!(TripDuration::parse("45min").minutes(), 45);
    /// assert_eq!(TripDuration::parse("2h").minutes(), 120);
    /// assert_eq!(TripDuration::parse("N/A"), TripDuration::UNKNOWN);
    /// assert_eq!(TripDuration::parse(""), TripDuration::UNKNOWN);
    /// ```
    pub fn parse(s: &str) -> Self {
        parse_minutes(s.trim()).map_or(Self::UNKNOWN, Self)
    }
}

fn parse_minutes(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }

    let s = s.strip_suffix("min").unwrap_or(s);

    match s.split_once('h') {
        Some((hours, minutes)) => {
            let hours: u32 = hours.parse().ok()?;
            let minutes: u32 = if minutes.is_empty() {
                0
            } else {
                minutes.parse().ok()?
            };
            hours.checked_mul(60)?.checked_add(minutes)
        }
        None => s.parse().ok(),
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_known() {
            return f.write_str("N/A");
        }
        let hours = self.0 / 60;
        let minutes = self.0 % 60;
        if hours > 0 {
            write!(f, "{hours}h{minutes:02}")
        } else {
            write!(f, "{minutes}min")
        }
    }
}

impl Serialize for TripDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Format a transfer wait the way it is shown to riders ("25 min").
pub fn format_wait(minutes: u32) -> String {
    format!("{minutes} min")
}
