//! Connection assembler.
//!
//! Pairs direct legs origin → transfer and transfer → destination into
//! single-transfer connections, rejecting pairings a rider should not take.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::domain::{Connection, DomainError, Leg, StationId, Stop, TrainId};
use crate::network::NetworkRepository;

use super::config::{MissingTrainPolicy, SearchConfig};
use super::direct::find_direct_legs;

/// Why a pair of legs was not offered as a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The second train calls at the origin after the transfer station, so
    /// the rider would ride back through where they started.
    #[error("second train passes the origin after the transfer station")]
    SecondTrainBacktracks,

    /// The first train reaches the destination itself.
    #[error("first train already serves the destination")]
    FirstTrainServesDestination,

    #[error("both legs are on the same train")]
    SameTrain,

    #[error("wait of {0} min is outside the transfer window")]
    WaitOutOfRange(u32),

    /// A train record needed for validation could not be resolved.
    #[error("train {0} could not be resolved")]
    MissingTrain(TrainId),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Builds deduplicated single-transfer connections.
pub struct ConnectionAssembler<'a, R: ?Sized> {
    repo: &'a R,
    config: &'a SearchConfig,
}

impl<'a, R: NetworkRepository + ?Sized> ConnectionAssembler<'a, R> {
    pub fn new(repo: &'a R, config: &'a SearchConfig) -> Self {
        Self { repo, config }
    }

    /// Assemble connections through `candidates`, tried in order.
    ///
    /// Connections on the same pair of train numbers are deduplicated,
    /// keeping the shortest total duration; on a tie the one found first is
    /// kept. The result is in order of first discovery of each pair.
    pub fn assemble(
        &self,
        origin: StationId,
        destination: StationId,
        candidates: &[StationId],
    ) -> Vec<Connection> {
        let mut connections: Vec<Connection> = Vec::new();
        let mut by_pair: HashMap<(String, String), usize> = HashMap::new();
        let mut rejected = 0usize;

        for &transfer in candidates {
            let first_legs = find_direct_legs(self.repo, origin, transfer);
            if first_legs.is_empty() {
                continue;
            }
            let second_legs = find_direct_legs(self.repo, transfer, destination);

            for first in &first_legs {
                for second in &second_legs {
                    let connection = match self.connect(first, second, origin, destination) {
                        Ok(c) => c,
                        Err(reason) => {
                            trace!(
                                first = first.train_number(),
                                second = second.train_number(),
                                %transfer,
                                %reason,
                                "rejected connection"
                            );
                            rejected += 1;
                            continue;
                        }
                    };

                    let (a, b) = connection.train_pair();
                    let key = (a.to_string(), b.to_string());
                    match by_pair.get(&key) {
                        Some(&i) => {
                            if connection.total_duration() < connections[i].total_duration() {
                                connections[i] = connection;
                            }
                        }
                        None => {
                            by_pair.insert(key, connections.len());
                            connections.push(connection);
                        }
                    }
                }
            }
        }

        debug!(
            %origin,
            %destination,
            kept = connections.len(),
            rejected,
            "assembled connections"
        );
        connections
    }

    /// Validate a pair of legs and join them.
    ///
    /// `first` must end where `second` starts.
    pub fn connect(
        &self,
        first: &Leg,
        second: &Leg,
        origin: StationId,
        destination: StationId,
    ) -> Result<Connection, Rejection> {
        let transfer = first.destination_station();

        if self.second_train_backtracks(second.train_id(), origin, transfer)? {
            return Err(Rejection::SecondTrainBacktracks);
        }

        if self.first_train_serves(first.train_id(), destination)? {
            return Err(Rejection::FirstTrainServesDestination);
        }

        if first.train_id() == second.train_id() {
            return Err(Rejection::SameTrain);
        }

        let wait = first.arrival_time().minutes_until(second.departure_time());
        if !self.config.transfer_window_contains(wait) {
            return Err(Rejection::WaitOutOfRange(wait));
        }

        Ok(Connection::new(first.clone(), second.clone())?)
    }

    /// Over the train's whole run, compare the last call at the origin with
    /// the last call at the transfer station.
    fn second_train_backtracks(
        &self,
        train: TrainId,
        origin: StationId,
        transfer: StationId,
    ) -> Result<bool, Rejection> {
        let Some(stops) = self.full_run(train)? else {
            return Ok(false);
        };

        let last_seq = |station| {
            stops
                .iter()
                .filter(|s| s.station == station)
                .map(|s| s.sequence)
                .last()
        };

        Ok(match (last_seq(origin), last_seq(transfer)) {
            (Some(at_origin), Some(at_transfer)) => at_transfer < at_origin,
            _ => false,
        })
    }

    fn first_train_serves(&self, train: TrainId, destination: StationId) -> Result<bool, Rejection> {
        Ok(self
            .full_run(train)?
            .is_some_and(|stops| stops.iter().any(|s| s.station == destination)))
    }

    /// The train's stops, or `None` if the record is missing and the policy
    /// lets the check pass.
    fn full_run(&self, train: TrainId) -> Result<Option<&'a [Stop]>, Rejection> {
        match self.repo.stops_for_train(train) {
            Ok(stops) => Ok(Some(stops)),
            Err(e) => match self.config.missing_train_policy {
                MissingTrainPolicy::FailOpen => {
                    warn!(%train, error = %e, "train missing during validation, check skipped");
                    Ok(None)
                }
                MissingTrainPolicy::FailClosed => {
                    warn!(%train, error = %e, "train missing during validation, connection rejected");
                    Err(Rejection::MissingTrain(train))
                }
            },
        }
    }
}
