//! Itinerary types.
//!
//! An `Itinerary` is a travel option offered to the rider: either a single
//! direct leg, or two legs joined at a transfer station.

use std::fmt;

use serde::{Serialize, Serializer};

use super::{ClockTime, DomainError, Leg, OperatingDays, StationId, TripDuration};

/// Where and when the rider changes trains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPoint {
    pub station: StationId,
    pub name_fr: String,
    pub name_ar: String,
    /// Arrival of the first train
    pub arrival: ClockTime,
    /// Departure of the second train
    pub departure: ClockTime,
    /// Wait at the platform, with next-day rollover
    pub wait_minutes: u32,
}

/// Two legs joined at a transfer station.
///
/// # Invariants
///
/// - The first leg ends where the second begins
/// - The legs are on different trains
/// - The transfer station is neither the overall origin nor destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    first: Leg,
    second: Leg,
    transfer: TransferPoint,
    total: TripDuration,
}

impl Connection {
    /// Join two legs, validating that they form a single-transfer trip.
    pub fn new(first: Leg, second: Leg) -> Result<Self, DomainError> {
        let arrives_at = first.destination_station();
        let departs_from = second.origin_station();
        if arrives_at != departs_from {
            return Err(DomainError::LegsDoNotMeet {
                arrives_at,
                departs_from,
            });
        }

        if first.train_id() == second.train_id() {
            return Err(DomainError::SameTrain(first.train_number().to_string()));
        }

        if arrives_at == first.origin_station() || arrives_at == second.destination_station() {
            return Err(DomainError::TransferAtEndpoint(arrives_at));
        }

        let transfer = TransferPoint {
            station: arrives_at,
            name_fr: first.destination().name_fr.clone(),
            name_ar: first.destination().name_ar.clone(),
            arrival: first.arrival_time(),
            departure: second.departure_time(),
            wait_minutes: first.arrival_time().minutes_until(second.departure_time()),
        };
        let total = TripDuration::between(first.departure_time(), second.arrival_time());

        Ok(Self {
            first,
            second,
            transfer,
            total,
        })
    }

    pub fn first(&self) -> &Leg {
        &self.first
    }

    pub fn second(&self) -> &Leg {
        &self.second
    }

    pub fn transfer(&self) -> &TransferPoint {
        &self.transfer
    }

    /// Origin departure to destination arrival, with rollover.
    pub fn total_duration(&self) -> TripDuration {
        self.total
    }

    /// Key used to deduplicate connections found via different stations.
    pub fn train_pair(&self) -> (&str, &str) {
        (self.first.train_number(), self.second.train_number())
    }
}

/// A travel option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Itinerary {
    /// One train, no transfer
    Direct(Leg),
    /// Two trains, one transfer
    Connection(Connection),
}

impl Itinerary {
    pub fn is_direct(&self) -> bool {
        matches!(self, Itinerary::Direct(_))
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> Vec<&Leg> {
        match self {
            Itinerary::Direct(leg) => vec![leg],
            Itinerary::Connection(c) => vec![&c.first, &c.second],
        }
    }

    fn first_leg(&self) -> &Leg {
        match self {
            Itinerary::Direct(leg) => leg,
            Itinerary::Connection(c) => &c.first,
        }
    }

    fn last_leg(&self) -> &Leg {
        match self {
            Itinerary::Direct(leg) => leg,
            Itinerary::Connection(c) => &c.second,
        }
    }

    pub fn origin(&self) -> StationId {
        self.first_leg().origin_station()
    }

    pub fn destination(&self) -> StationId {
        self.last_leg().destination_station()
    }

    pub fn departure_time(&self) -> ClockTime {
        self.first_leg().departure_time()
    }

    pub fn arrival_time(&self) -> ClockTime {
        self.last_leg().arrival_time()
    }

    pub fn duration(&self) -> TripDuration {
        match self {
            Itinerary::Direct(leg) => leg.duration(),
            Itinerary::Connection(c) => c.total,
        }
    }

    /// Train numbers for display, e.g. "27" or "22 + 1025".
    pub fn train_numbers(&self) -> String {
        self.legs()
            .iter()
            .map(|leg| leg.train_number())
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Route names for display, e.g. "Thenia - Alger / Alger - El Affroun".
    pub fn route_names(&self) -> String {
        self.legs()
            .iter()
            .map(|leg| leg.route_name())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Operating patterns of every leg.
    pub fn operating_days(&self) -> Vec<OperatingDays> {
        self.legs().iter().map(|leg| leg.operating_days()).collect()
    }

    /// Transfer details, for connections.
    pub fn transfer(&self) -> Option<&TransferPoint> {
        match self {
            Itinerary::Direct(_) => None,
            Itinerary::Connection(c) => Some(&c.transfer),
        }
    }
}

/// Descriptive tag attached to a ranked itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    Direct,
    Fast,
    BestOverall,
    Fastest,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Direct => "Direct",
            Badge::Fast => "Fast",
            Badge::BestOverall => "Best Overall",
            Badge::Fastest => "Fastest",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Badge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// An itinerary with its ranking metadata.
///
/// `score` is `None` when no departure time was requested, in which case
/// no ranking pass runs and `badges` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedItinerary {
    pub itinerary: Itinerary,
    pub score: Option<u32>,
    pub badges: Vec<Badge>,
}

impl RankedItinerary {
    /// Wrap an itinerary without ranking it.
    pub fn unranked(itinerary: Itinerary) -> Self {
        Self {
            itinerary,
            score: None,
            badges: Vec::new(),
        }
    }

    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }
}
