//! Itinerary search.
//!
//! Direct trips are looked up first. Only when there are few of them are
//! single-transfer connections assembled as well. The combined set is then
//! filtered by operating day and departure time, ranked, and capped.

use serde::Deserialize;
use tracing::debug;

use crate::domain::{ClockTime, InvalidStationId, Itinerary, RankedItinerary, ServiceDay, StationId};
use crate::network::NetworkRepository;

use super::config::SearchConfig;
use super::connection::ConnectionAssembler;
use super::direct::find_direct_legs;
use super::filter::{DaySelection, TimeWindow, filter_by_day, filter_by_time, parse_requested_time};
use super::rank::rank_itineraries;
use super::transfer::transfer_candidates;

/// Error from itinerary search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A required station parameter is absent
    #[error("missing {0} station")]
    MissingStation(&'static str),

    #[error(transparent)]
    InvalidStationId(#[from] InvalidStationId),

    #[error("station {0} not found")]
    StationNotFound(StationId),
}

/// Raw search parameters as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "from")]
    pub origin: Option<String>,

    #[serde(rename = "to")]
    pub destination: Option<String>,

    /// Requested departure time, `HH:MM`
    pub time: Option<String>,

    /// Day index, 0 = Sunday
    pub day: Option<String>,
}

/// Validated request for itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub origin: StationId,
    pub destination: StationId,

    /// Departure time to filter and rank against, if any.
    pub requested_time: Option<ClockTime>,

    pub day: DaySelection,
}

impl SearchRequest {
    /// Create a request with no time and no day filter.
    pub fn new(origin: StationId, destination: StationId) -> Self {
        Self {
            origin,
            destination,
            requested_time: None,
            day: DaySelection::Unfiltered,
        }
    }

    pub fn at(mut self, time: ClockTime) -> Self {
        self.requested_time = Some(time);
        self
    }

    pub fn on(mut self, day: ServiceDay) -> Self {
        self.day = DaySelection::Day(day);
        self
    }

    /// Build a request from raw parameters.
    ///
    /// Missing or non-numeric station ids are errors. A malformed time or
    /// day only turns off the corresponding filter; a missing day means
    /// `today`.
    pub fn from_query(query: &SearchQuery, today: ServiceDay) -> Result<Self, SearchError> {
        let origin = required_station(query.origin.as_deref(), "origin")?;
        let destination = required_station(query.destination.as_deref(), "destination")?;

        Ok(Self {
            origin,
            destination,
            requested_time: parse_requested_time(query.time.as_deref()),
            day: DaySelection::parse(query.day.as_deref(), today),
        })
    }
}

fn required_station(raw: Option<&str>, which: &'static str) -> Result<StationId, SearchError> {
    match raw.map(str::trim) {
        None | Some("") => Err(SearchError::MissingStation(which)),
        Some(raw) => Ok(StationId::parse(raw)?),
    }
}

/// Result of itinerary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Found itineraries, best first when ranked.
    pub itineraries: Vec<RankedItinerary>,

    /// Direct itineraries among `itineraries`.
    pub direct_count: usize,

    /// Connections among `itineraries`.
    pub connection_count: usize,

    /// Whether a ranking pass ran (a valid time was requested).
    pub ranked: bool,
}

impl SearchResult {
    /// Create an empty result.
    pub fn empty(ranked: bool) -> Self {
        Self {
            itineraries: Vec::new(),
            direct_count: 0,
            connection_count: 0,
            ranked,
        }
    }

    fn new(itineraries: Vec<RankedItinerary>, ranked: bool) -> Self {
        let direct_count = itineraries.iter().filter(|r| r.itinerary.is_direct()).count();
        Self {
            connection_count: itineraries.len() - direct_count,
            direct_count,
            itineraries,
            ranked,
        }
    }
}

/// Itinerary planner over a network repository.
pub struct Planner<'a, R: ?Sized> {
    repo: &'a R,
    config: &'a SearchConfig,
}

impl<'a, R: NetworkRepository + ?Sized> Planner<'a, R> {
    /// Create a new planner.
    pub fn new(repo: &'a R, config: &'a SearchConfig) -> Self {
        Self { repo, config }
    }

    /// Search for itineraries from origin to destination.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        for station in [request.origin, request.destination] {
            self.repo
                .station(station)
                .map_err(|_| SearchError::StationNotFound(station))?;
        }

        let ranked = request.requested_time.is_some();
        if request.origin == request.destination {
            return Ok(SearchResult::empty(ranked));
        }

        let mut itineraries: Vec<Itinerary> =
            find_direct_legs(self.repo, request.origin, request.destination)
                .into_iter()
                .map(Itinerary::Direct)
                .collect();
        let direct_found = itineraries.len();

        if direct_found < self.config.direct_threshold {
            let candidates = transfer_candidates(
                self.repo,
                request.origin,
                request.destination,
                &self.config.hub_stations,
            );
            let connections = ConnectionAssembler::new(self.repo, self.config).assemble(
                request.origin,
                request.destination,
                &candidates,
            );
            itineraries.extend(connections.into_iter().map(Itinerary::Connection));
        }

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            direct = direct_found,
            connections = itineraries.len() - direct_found,
            "found itineraries"
        );

        let itineraries = filter_by_day(itineraries, request.day);
        let window = request
            .requested_time
            .map(|time| TimeWindow::new(time, self.config.lookback_mins));
        let itineraries = filter_by_time(itineraries, window);

        debug!(remaining = itineraries.len(), day = ?request.day, "filtered itineraries");

        let itineraries = rank_itineraries(itineraries, request.requested_time, self.config);
        Ok(SearchResult::new(itineraries, ranked))
    }
}
