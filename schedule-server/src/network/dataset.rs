//! JSON timetable datasets.
//!
//! A dataset is the serialized form of the network: lines, stations and
//! trains with their stops. It is converted into a [`NetworkIndex`] once
//! at load time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{ClockTime, Line, LineId, OperatingDays, Station, StationId, Train, TrainId};

use super::{NetworkError, NetworkIndex};

/// The bundled sample network (SNTF Algiers suburban lines).
pub const SAMPLE_NETWORK_JSON: &str = include_str!("../../data/sample_network.json");

/// Errors that can occur when loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Reading or writing the dataset file failed
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON for the expected shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A train's operating days could not be determined
    #[error("train {train}: unrecognised operating days {display:?}")]
    UnknownOperatingDays { train: String, display: String },

    /// The records are individually valid but inconsistent
    #[error("invalid network: {0}")]
    Network(#[from] NetworkError),

    /// The background load task panicked or was cancelled
    #[error("dataset load task failed: {0}")]
    LoadTask(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: u32,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: u32,
    pub name_fr: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRecord {
    pub station: u32,
    pub time: ClockTime,
    /// Defaults to the stop's 1-based position in the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainRecord {
    pub id: u32,
    pub number: String,
    pub route: String,
    /// Authoritative pattern. Derived from `days_operational` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_days: Option<OperatingDays>,
    /// Legacy display string, e.g. "[1]"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_operational: Option<String>,
    pub stops: Vec<StopRecord>,
}

/// A whole network in serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDataset {
    #[serde(default)]
    pub lines: Vec<LineRecord>,
    pub stations: Vec<StationRecord>,
    pub trains: Vec<TrainRecord>,
}

impl NetworkDataset {
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a dataset from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Write the dataset as pretty-printed JSON.
    ///
    /// Creates parent directories if they don't exist.
    #[cfg(test)]
    pub(crate) fn save(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)?;
        Ok(())
    }

    /// Validate the records and build the lookup index.
    pub fn into_index(self) -> Result<NetworkIndex, DatasetError> {
        let mut builder = NetworkIndex::builder();

        for line in self.lines {
            builder = builder.line(Line {
                id: LineId(line.id),
                name: line.name,
                code: line.code,
            });
        }

        for record in self.stations {
            let mut station = Station::new(StationId(record.id), record.name_fr, record.name_ar);
            if let Some(line) = record.line {
                station = station.with_line(LineId(line));
            }
            builder = builder.station(station);
        }

        for record in self.trains {
            let operating_days =
                resolve_operating_days(&record.number, record.operating_days, record.days_operational.as_deref())?;

            let mut train = Train::new(TrainId(record.id), record.number, record.route, operating_days);
            if let Some(display) = record.days_operational {
                train.days_display = display;
            }

            let stops: Vec<(StationId, ClockTime, u32)> = record
                .stops
                .into_iter()
                .zip(1u32..)
                .map(|(stop, position)| {
                    (StationId(stop.station), stop.time, stop.sequence.unwrap_or(position))
                })
                .collect();

            builder = builder.train(train, stops);
        }

        let index = builder.build()?;
        info!(
            stations = index.station_count(),
            trains = index.train_count(),
            "loaded network dataset"
        );
        Ok(index)
    }
}

/// Pick the authoritative operating pattern for a train record.
///
/// The structured field wins; the legacy string is only consulted when the
/// structured field is missing. Disagreement is logged, not rejected.
fn resolve_operating_days(
    train: &str,
    structured: Option<OperatingDays>,
    legacy: Option<&str>,
) -> Result<OperatingDays, DatasetError> {
    let from_legacy = legacy.map(|s| (s, OperatingDays::from_legacy(s)));

    match (structured, from_legacy) {
        (Some(days), Some((legacy_display, parsed))) => {
            if parsed != Some(days) {
                warn!(
                    train,
                    operating_days = days.as_str(),
                    days_operational = legacy_display,
                    "legacy operating days disagree with structured value"
                );
            }
            Ok(days)
        }
        (Some(days), None) => Ok(days),
        (None, Some((_, Some(parsed)))) => Ok(parsed),
        (None, Some((display, None))) => Err(DatasetError::UnknownOperatingDays {
            train: train.to_string(),
            display: display.to_string(),
        }),
        (None, None) => Ok(OperatingDays::Daily),
    }
}

/// Build the index for the bundled sample network.
pub fn sample_network() -> Result<NetworkIndex, DatasetError> {
    NetworkDataset::from_json(SAMPLE_NETWORK_JSON)?.into_index()
}
