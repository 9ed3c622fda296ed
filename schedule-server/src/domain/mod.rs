//! Domain types for the commuter-rail itinerary planner.
//!
//! This module contains the core domain model types that represent
//! validated timetable data. Types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod day;
mod duration;
mod error;
mod itinerary;
mod leg;
mod station;
mod time;
mod train;

pub use day::ServiceDay;
pub use duration::{TripDuration, format_wait};
pub use error::DomainError;
pub use itinerary::{Badge, Connection, Itinerary, RankedItinerary, TransferPoint};
pub use leg::{Leg, LegStop};
pub use station::{InvalidStationId, Line, LineId, Station, StationId};
pub use time::{ClockTime, MINUTES_PER_DAY, TimeError};
pub use train::{OperatingDays, Stop, Train, TrainId};
