//! Train leg type.
//!
//! A `Leg` is a contiguous slice of one train's run, from the stop where
//! the rider boards to the stop where they alight, with every stop in
//! between.

use super::{ClockTime, DomainError, OperatingDays, StationId, Train, TrainId, TripDuration};

/// One stop within a leg, with its station names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegStop {
    pub station: StationId,
    pub name_fr: String,
    pub name_ar: String,
    pub time: ClockTime,
    pub sequence: u32,
}

/// A leg of an itinerary (one train).
///
/// # Invariants
///
/// - At least two stops (origin and destination)
/// - Stop sequence numbers are strictly increasing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    train: TrainId,
    train_number: String,
    route_name: String,
    operating_days: OperatingDays,
    days_display: String,
    stops: Vec<LegStop>,
}

impl Leg {
    /// Construct a leg from the stops between origin and destination,
    /// inclusive.
    ///
    /// # Errors
    ///
    /// Returns `Err` if fewer than two stops are given or the sequence
    /// numbers do not strictly increase.
    ///
    /// # Examples
    ///
    /// ```
    /// use schedule_server::domain::{
    ///     ClockTime, Leg, LegStop, OperatingDays, StationId, Train, TrainId,
    /// };
    ///
    /// let train = Train::new(TrainId(1), "33", "Alger - Thenia", OperatingDays::Daily);
    /// let stop = |id, name: &str, time, sequence| LegStop {
    ///     station: StationId(id),
    ///     name_fr: name.into(),
    ///     name_ar: String::new(),
    ///     time: ClockTime::parse_hhmm(time).unwrap(),
    ///     sequence,
    /// };
    ///
    /// let leg = Leg::new(
    ///     &train,
    ///     vec![stop(1, "Alger", "07:30", 1), stop(6, "El Harrach", "07:47", 6)],
    /// )
    /// .unwrap();
    /// assert_eq!(leg.duration().to_string(), "17min");
    /// ```
    pub fn new(train: &Train, stops: Vec<LegStop>) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::InvalidLeg(
                "a leg needs an origin and a destination stop",
            ));
        }

        if stops.windows(2).any(|w| w[1].sequence <= w[0].sequence) {
            return Err(DomainError::InvalidLeg(
                "stop sequence must strictly increase",
            ));
        }

        Ok(Leg {
            train: train.id,
            train_number: train.number.clone(),
            route_name: train.route_name.clone(),
            operating_days: train.operating_days,
            days_display: train.days_display.clone(),
            stops,
        })
    }

    /// Returns the train this leg is on.
    pub fn train_id(&self) -> TrainId {
        self.train
    }

    pub fn train_number(&self) -> &str {
        &self.train_number
    }

    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    pub fn operating_days(&self) -> OperatingDays {
        self.operating_days
    }

    /// Returns the legacy display string of the train's operating days.
    pub fn days_display(&self) -> &str {
        &self.days_display
    }

    /// Returns the boarding stop.
    pub fn origin(&self) -> &LegStop {
        // Safe: at least two stops, validated at construction
        &self.stops[0]
    }

    /// Returns the alighting stop.
    pub fn destination(&self) -> &LegStop {
        &self.stops[self.stops.len() - 1]
    }

    pub fn origin_station(&self) -> StationId {
        self.origin().station
    }

    pub fn destination_station(&self) -> StationId {
        self.destination().station
    }

    pub fn departure_time(&self) -> ClockTime {
        self.origin().time
    }

    pub fn arrival_time(&self) -> ClockTime {
        self.destination().time
    }

    /// Returns the travel time, with midnight rollover.
    pub fn duration(&self) -> TripDuration {
        TripDuration::between(self.departure_time(), self.arrival_time())
    }

    /// Returns all stops for this leg (origin to destination, inclusive).
    pub fn stops(&self) -> &[LegStop] {
        &self.stops
    }

    /// Returns the number of intermediate stops (excluding both ends).
    pub fn intermediate_stop_count(&self) -> usize {
        self.stops.len() - 2
    }
}
