//! Test networks shared by the planner tests.

use crate::domain::{ClockTime, OperatingDays, Station, StationId, Train, TrainId};
use crate::network::{NetworkIndex, sample_network};

pub fn t(s: &str) -> ClockTime {
    ClockTime::parse_hhmm(s).unwrap()
}

/// The bundled sample network.
pub fn sample() -> NetworkIndex {
    sample_network().unwrap()
}

/// Look up a station id by French name.
pub fn id(index: &NetworkIndex, name: &str) -> StationId {
    index
        .station_named(name)
        .unwrap_or_else(|| panic!("no station named {name}"))
        .id
}

/// Builds small networks from station names and `(station, time)` lists.
///
/// Stations get ids in order of first appearance, trains in order of
/// insertion, both starting at 1.
#[derive(Default)]
pub struct TestNetwork {
    stations: Vec<String>,
    trains: Vec<(String, OperatingDays, Vec<(String, ClockTime)>)>,
}

impl TestNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register stations up front to control their ids.
    pub fn stations(mut self, names: &[&str]) -> Self {
        for name in names {
            self.register(name);
        }
        self
    }

    pub fn train(mut self, number: &str, days: OperatingDays, stops: &[(&str, &str)]) -> Self {
        let stops = stops
            .iter()
            .map(|(name, time)| {
                self.register(name);
                (name.to_string(), t(time))
            })
            .collect();
        self.trains.push((number.to_string(), days, stops));
        self
    }

    pub fn daily(self, number: &str, stops: &[(&str, &str)]) -> Self {
        self.train(number, OperatingDays::Daily, stops)
    }

    fn register(&mut self, name: &str) {
        if !self.stations.iter().any(|s| s == name) {
            self.stations.push(name.to_string());
        }
    }

    fn station_id(&self, name: &str) -> StationId {
        let pos = self.stations.iter().position(|s| s == name).unwrap();
        StationId(pos as u32 + 1)
    }

    pub fn build(self) -> NetworkIndex {
        let mut builder = NetworkIndex::builder();
        for (i, name) in self.stations.iter().enumerate() {
            builder = builder.station(Station::new(StationId(i as u32 + 1), name, format!("{name} (ar)")));
        }
        for (i, (number, days, stops)) in self.trains.iter().enumerate() {
            let train = Train::new(TrainId(i as u32 + 1), number, format!("Route {number}"), *days);
            let stops: Vec<_> = stops
                .iter()
                .zip(1u32..)
                .map(|((name, time), seq)| (self.station_id(name), *time, seq))
                .collect();
            builder = builder.train(train, stops);
        }
        builder.build().unwrap()
    }
}
