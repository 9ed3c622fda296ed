//! Day-of-week and time-window filters.
//!
//! Both filters fail open: a malformed day or time in the request turns
//! the corresponding filter off instead of rejecting the search.

use tracing::debug;

use crate::domain::{ClockTime, Itinerary, OperatingDays, ServiceDay};

/// Which operating day a search is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelection {
    Day(ServiceDay),
    Unfiltered,
}

impl DaySelection {
    /// Interpret the raw `day` request parameter.
    ///
    /// Missing or empty selects `today`; an integer 0-6 selects that day
    /// (0 = Sunday); anything else disables day filtering.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::ServiceDay;
    /// use schedule_server::planner::DaySelection;
    ///
    /// let today = ServiceDay::MONDAY;
    /// assert_eq!(DaySelection::parse(Some("5"), today), DaySelection::Day(ServiceDay::FRIDAY));
    /// assert_eq!(DaySelection::parse(None, today), DaySelection::Day(today));
    /// assert_eq!(DaySelection::parse(Some("7"), today), DaySelection::Unfiltered);
    /// ```
    pub fn parse(raw: Option<&str>, today: ServiceDay) -> Self {
        let raw = match raw.map(str::trim) {
            None | Some("") => return DaySelection::Day(today),
            Some(raw) => raw,
        };

        match raw.parse::<u8>().ok().and_then(ServiceDay::from_index) {
            Some(day) => DaySelection::Day(day),
            None => {
                debug!(day = raw, "ignoring malformed day filter");
                DaySelection::Unfiltered
            }
        }
    }

    pub fn allows(&self, days: OperatingDays) -> bool {
        match self {
            DaySelection::Day(day) => days.runs_on(*day),
            DaySelection::Unfiltered => true,
        }
    }

    /// Every leg of the itinerary must run on the selected day.
    pub fn allows_itinerary(&self, itinerary: &Itinerary) -> bool {
        itinerary
            .operating_days()
            .into_iter()
            .all(|days| self.allows(days))
    }
}

/// Parse the raw `time` request parameter.
///
/// Returns `None` when absent or malformed.
pub fn parse_requested_time(raw: Option<&str>) -> Option<ClockTime> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match ClockTime::parse_hhmm(raw) {
        Ok(time) => Some(time),
        Err(e) => {
            debug!(time = raw, error = %e, "ignoring malformed requested time");
            None
        }
    }
}

/// Lower bound on departure time relative to a requested time.
///
/// There is no upper bound; late departures are demoted by ranking instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    earliest: ClockTime,
}

impl TimeWindow {
    /// Admit departures from `lookback_mins` before `requested`. The bound
    /// does not wrap to the previous evening.
    pub fn new(requested: ClockTime, lookback_mins: u32) -> Self {
        Self {
            earliest: requested.saturating_sub_minutes(lookback_mins),
        }
    }

    pub fn earliest(&self) -> ClockTime {
        self.earliest
    }

    pub fn admits(&self, departure: ClockTime) -> bool {
        departure >= self.earliest
    }
}

pub fn filter_by_day(itineraries: Vec<Itinerary>, selection: DaySelection) -> Vec<Itinerary> {
    itineraries
        .into_iter()
        .filter(|it| selection.allows_itinerary(it))
        .collect()
}

pub fn filter_by_time(itineraries: Vec<Itinerary>, window: Option<TimeWindow>) -> Vec<Itinerary> {
    let Some(window) = window else {
        return itineraries;
    };
    itineraries
        .into_iter()
        .filter(|it| window.admits(it.departure_time()))
        .collect()
}
