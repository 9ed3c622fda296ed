//! Itinerary planner.
//!
//! Answers "how do I get from station A to station B": direct trains first,
//! then single-transfer connections when direct service is sparse, filtered
//! by operating day and requested departure time and ranked by a weighted
//! score.

mod config;
mod connection;
mod direct;
mod filter;
mod rank;
mod search;
mod transfer;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod search_tests;

pub use config::{MissingTrainPolicy, SearchConfig};
pub use connection::{ConnectionAssembler, Rejection};
pub use direct::find_direct_legs;
pub use filter::{DaySelection, TimeWindow, filter_by_day, filter_by_time, parse_requested_time};
pub use rank::{rank_itineraries, score};
pub use search::{Planner, SearchError, SearchQuery, SearchRequest, SearchResult};
pub use transfer::transfer_candidates;
