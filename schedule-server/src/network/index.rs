//! In-memory network index.
//!
//! All lookups the planner needs (station → trains, train → ordered stops)
//! are computed once when the index is built. The index is immutable
//! afterwards and can be shared between concurrent searches without locking.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::domain::{ClockTime, Line, LineId, Station, StationId, Stop, Train, TrainId};

use super::{NetworkRepository, RepositoryError};

/// Error building a network index from inconsistent data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("duplicate station id {0}")]
    DuplicateStation(StationId),

    #[error("duplicate train id {0}")]
    DuplicateTrain(TrainId),

    #[error("duplicate line id {0}")]
    DuplicateLine(LineId),

    #[error("station {station} references unknown line {line}")]
    UnknownLine { station: StationId, line: LineId },

    #[error("train {train} stops at unknown station {station}")]
    UnknownStation { train: String, station: StationId },

    #[error("train {train} has more than one stop with sequence {sequence}")]
    DuplicateSequence { train: String, sequence: u32 },
}

/// Builder for [`NetworkIndex`].
///
/// # Examples
///
/// ```
/// use schedule_server::domain::{ClockTime, OperatingDays, Station, StationId, Train, TrainId};
/// use schedule_server::network::{NetworkIndex, NetworkRepository};
///
/// let t = |s| ClockTime::parse_hhmm(s).unwrap();
/// let index = NetworkIndex::builder()
///     .station(Station::new(StationId(1), "Alger", "الجزائر"))
///     .station(Station::new(StationId(2), "Agha", "آغا"))
///     .train(
///         Train::new(TrainId(1), "33", "Alger - Thenia", OperatingDays::Daily),
///         [(StationId(1), t("07:30"), 1), (StationId(2), t("07:33"), 2)],
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(index.trains_through_station(StationId(2)), &[TrainId(1)]);
/// ```
#[derive(Debug, Default)]
pub struct NetworkIndexBuilder {
    lines: Vec<Line>,
    stations: Vec<Station>,
    trains: Vec<(Train, Vec<(StationId, ClockTime, u32)>)>,
}

impl NetworkIndexBuilder {
    pub fn line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    pub fn station(mut self, station: Station) -> Self {
        self.stations.push(station);
        self
    }

    /// Add a train with its stops as `(station, departure time, sequence)`.
    ///
    /// Stops may be given in any order; they are sorted by sequence.
    pub fn train(
        mut self,
        train: Train,
        stops: impl IntoIterator<Item = (StationId, ClockTime, u32)>,
    ) -> Self {
        self.trains.push((train, stops.into_iter().collect()));
        self
    }

    /// Validate the data and build the index.
    pub fn build(self) -> Result<NetworkIndex, NetworkError> {
        let mut lines = BTreeMap::new();
        for line in self.lines {
            let id = line.id;
            if lines.insert(id, line).is_some() {
                return Err(NetworkError::DuplicateLine(id));
            }
        }

        let mut stations = BTreeMap::new();
        for station in self.stations {
            if let Some(line) = station.line {
                if !lines.contains_key(&line) {
                    return Err(NetworkError::UnknownLine {
                        station: station.id,
                        line,
                    });
                }
            }
            let id = station.id;
            if stations.insert(id, station).is_some() {
                return Err(NetworkError::DuplicateStation(id));
            }
        }

        let mut trains = BTreeMap::new();
        let mut stops_by_train: HashMap<TrainId, Vec<Stop>> = HashMap::new();

        for (train, raw_stops) in self.trains {
            let mut stops: Vec<Stop> = raw_stops
                .into_iter()
                .map(|(station, departure_time, sequence)| Stop {
                    train: train.id,
                    station,
                    departure_time,
                    sequence,
                })
                .collect();
            stops.sort_by_key(|s| s.sequence);

            if let Some(w) = stops.windows(2).find(|w| w[0].sequence == w[1].sequence) {
                return Err(NetworkError::DuplicateSequence {
                    train: train.number.clone(),
                    sequence: w[0].sequence,
                });
            }

            if let Some(stop) = stops.iter().find(|s| !stations.contains_key(&s.station)) {
                return Err(NetworkError::UnknownStation {
                    train: train.number.clone(),
                    station: stop.station,
                });
            }

            let id = train.id;
            if trains.insert(id, train).is_some() {
                return Err(NetworkError::DuplicateTrain(id));
            }
            stops_by_train.insert(id, stops);
        }

        // Trains are visited in id order, so each station's list is sorted
        let mut trains_by_station: HashMap<StationId, Vec<TrainId>> = HashMap::new();
        for id in trains.keys() {
            let served: BTreeSet<StationId> = stops_by_train
                .get(id)
                .map(|stops| stops.iter().map(|s| s.station).collect())
                .unwrap_or_default();
            for station in served {
                trains_by_station.entry(station).or_default().push(*id);
            }
        }

        let index = NetworkIndex {
            lines,
            stations,
            trains,
            stops_by_train,
            trains_by_station,
        };

        debug!(
            stations = index.station_count(),
            trains = index.train_count(),
            stops = index.stop_count(),
            "built network index"
        );

        Ok(index)
    }
}

/// Eagerly built, immutable view of the whole network.
#[derive(Debug, Clone, Default)]
pub struct NetworkIndex {
    lines: BTreeMap<LineId, Line>,
    stations: BTreeMap<StationId, Station>,
    trains: BTreeMap<TrainId, Train>,
    stops_by_train: HashMap<TrainId, Vec<Stop>>,
    trains_by_station: HashMap<StationId, Vec<TrainId>>,
}

impl NetworkIndex {
    pub fn builder() -> NetworkIndexBuilder {
        NetworkIndexBuilder::default()
    }

    /// All stations ordered by id.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// All stations ordered by French name.
    pub fn stations_by_name(&self) -> Vec<&Station> {
        let mut stations: Vec<&Station> = self.stations.values().collect();
        stations.sort_by(|a, b| a.name_fr.cmp(&b.name_fr));
        stations
    }

    /// Find the first station (lowest id) with the given French name.
    pub fn station_named(&self, name_fr: &str) -> Option<&Station> {
        self.stations.values().find(|s| s.name_fr == name_fr)
    }

    /// All lines ordered by id.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// All trains ordered by id.
    pub fn trains(&self) -> impl Iterator<Item = &Train> {
        self.trains.values()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn train_count(&self) -> usize {
        self.trains.len()
    }

    pub fn stop_count(&self) -> usize {
        self.stops_by_train.values().map(Vec::len).sum()
    }
}

impl NetworkRepository for NetworkIndex {
    fn station(&self, id: StationId) -> Result<&Station, RepositoryError> {
        self.stations
            .get(&id)
            .ok_or(RepositoryError::StationNotFound(id))
    }

    fn trains_through_station(&self, station: StationId) -> &[TrainId] {
        self.trains_by_station
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn stops_for_train(&self, train: TrainId) -> Result<&[Stop], RepositoryError> {
        self.stops_by_train
            .get(&train)
            .map(Vec::as_slice)
            .ok_or(RepositoryError::TrainNotFound(train))
    }

    fn train(&self, id: TrainId) -> Result<&Train, RepositoryError> {
        self.trains.get(&id).ok_or(RepositoryError::TrainNotFound(id))
    }
}
