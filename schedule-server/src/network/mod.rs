//! Read-only access to the rail network.
//!
//! The planner only ever reads stations, trains and their ordered stops
//! through [`NetworkRepository`]. [`NetworkIndex`] is the in-memory
//! implementation, built eagerly from a [`NetworkDataset`].

mod dataset;
mod index;

pub use dataset::{DatasetError, NetworkDataset, SAMPLE_NETWORK_JSON, sample_network};
pub use index::{NetworkError, NetworkIndex, NetworkIndexBuilder};

use crate::domain::{Station, StationId, Stop, Train, TrainId};

/// Error from a repository lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("station {0} not found")]
    StationNotFound(StationId),

    #[error("train {0} not found")]
    TrainNotFound(TrainId),
}

/// Trait for read access to network data.
///
/// This abstraction allows the planner to be tested with synthetic
/// networks and with repositories that fail lookups on purpose.
pub trait NetworkRepository {
    /// Look up a station by id.
    fn station(&self, id: StationId) -> Result<&Station, RepositoryError>;

    /// Trains with at least one stop at `station`, each listed once, in a
    /// stable order.
    fn trains_through_station(&self, station: StationId) -> &[TrainId];

    /// A train's stops ordered by sequence.
    fn stops_for_train(&self, train: TrainId) -> Result<&[Stop], RepositoryError>;

    /// Look up a train by id.
    fn train(&self, id: TrainId) -> Result<&Train, RepositoryError>;
}
