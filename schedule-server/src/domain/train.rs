//! Train, stop and operating-day types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ClockTime, ServiceDay, StationId};

/// Identifier of a train record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainId(pub u32);

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Weekly operating pattern of a train.
///
/// Timetables print these as markers: `[*]` daily, `[1]` not on Fridays,
/// `[2]` Fridays only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingDays {
    Daily,
    NoFriday,
    FridayOnly,
}

impl OperatingDays {
    /// Returns true if a train with this pattern runs on `day`.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::{OperatingDays, ServiceDay};
    ///
    /// assert!(OperatingDays::Daily.runs_on(ServiceDay::FRIDAY));
    /// assert!(!OperatingDays::NoFriday.runs_on(ServiceDay::FRIDAY));
    /// assert!(OperatingDays::FridayOnly.runs_on(ServiceDay::FRIDAY));
    /// assert!(!OperatingDays::FridayOnly.runs_on(ServiceDay::MONDAY));
    /// ```
    pub fn runs_on(self, day: ServiceDay) -> bool {
        match self {
            OperatingDays::Daily => true,
            OperatingDays::NoFriday => !day.is_friday(),
            OperatingDays::FridayOnly => day.is_friday(),
        }
    }

    /// Interpret a legacy display string such as `"[1]"` or `"Daily [*]"`.
    ///
    /// Returns `None` if the string carries no recognisable marker.
    pub fn from_legacy(display: &str) -> Option<Self> {
        if display.contains("[*]") {
            Some(OperatingDays::Daily)
        } else if display.contains("[1]") {
            Some(OperatingDays::NoFriday)
        } else if display.contains("[2]") {
            Some(OperatingDays::FridayOnly)
        } else if display.trim().eq_ignore_ascii_case("daily") {
            Some(OperatingDays::Daily)
        } else {
            None
        }
    }

    /// The timetable marker for this pattern.
    pub fn legacy_marker(self) -> &'static str {
        match self {
            OperatingDays::Daily => "[*]",
            OperatingDays::NoFriday => "[1]",
            OperatingDays::FridayOnly => "[2]",
        }
    }

    /// Human-readable label including the marker, e.g. "No Friday [1]".
    pub fn label(self) -> &'static str {
        match self {
            OperatingDays::Daily => "Daily [*]",
            OperatingDays::NoFriday => "No Friday [1]",
            OperatingDays::FridayOnly => "Friday Only [2]",
        }
    }

    /// Serialized name, e.g. "no_friday".
    pub fn as_str(self) -> &'static str {
        match self {
            OperatingDays::Daily => "daily",
            OperatingDays::NoFriday => "no_friday",
            OperatingDays::FridayOnly => "friday_only",
        }
    }
}

/// A scheduled train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub id: TrainId,
    /// Public train number, e.g. "27" or "B609"
    pub number: String,
    /// Name of the route the train runs on, e.g. "Alger - Thenia"
    pub route_name: String,
    /// Authoritative operating pattern
    pub operating_days: OperatingDays,
    /// Legacy display string kept for riders ("[1]", "Daily", ...)
    pub days_display: String,
}

impl Train {
    /// Create a train whose display string is derived from its pattern.
    pub fn new(
        id: TrainId,
        number: impl Into<String>,
        route_name: impl Into<String>,
        operating_days: OperatingDays,
    ) -> Self {
        Self {
            id,
            number: number.into(),
            route_name: route_name.into(),
            operating_days,
            days_display: operating_days.label().to_string(),
        }
    }
}

/// A train's call at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop {
    pub train: TrainId,
    pub station: StationId,
    pub departure_time: ClockTime,
    /// Position in the train's run; strictly increasing along the train.
    pub sequence: u32,
}
