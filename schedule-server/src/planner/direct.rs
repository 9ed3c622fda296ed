//! Direct trip finder.
//!
//! A direct trip is a contiguous slice of one train's run from the origin
//! to the destination.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::domain::{DomainError, Leg, LegStop, StationId, Stop, TrainId};
use crate::network::{NetworkRepository, RepositoryError};

#[derive(Debug, thiserror::Error)]
enum LegError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Find every train that runs from `origin` to `destination`.
///
/// Uses the first stop at each station. Trains are skipped when the
/// destination comes first, when the arrival clock time is earlier than the
/// departure (overnight direct trips are not offered), or when any station
/// appears twice in the travelled slice, which screens out shuttles looping
/// back through the same platform.
///
/// Trains whose records cannot be resolved are skipped.
pub fn find_direct_legs<R: NetworkRepository + ?Sized>(
    repo: &R,
    origin: StationId,
    destination: StationId,
) -> Vec<Leg> {
    let mut legs = Vec::new();

    for &train_id in repo.trains_through_station(origin) {
        match direct_leg(repo, train_id, origin, destination) {
            Ok(Some(leg)) => legs.push(leg),
            Ok(None) => {}
            Err(e) => debug!(train = %train_id, error = %e, "skipping unresolvable train"),
        }
    }

    trace!(%origin, %destination, found = legs.len(), "direct legs");
    legs
}

fn direct_leg<R: NetworkRepository + ?Sized>(
    repo: &R,
    train_id: TrainId,
    origin: StationId,
    destination: StationId,
) -> Result<Option<Leg>, LegError> {
    let stops = repo.stops_for_train(train_id)?;

    let Some(board) = first_stop_at(stops, origin) else {
        return Ok(None);
    };
    let Some(alight) = first_stop_at(stops, destination) else {
        return Ok(None);
    };

    if alight.sequence <= board.sequence {
        return Ok(None);
    }
    if alight.departure_time < board.departure_time {
        trace!(train = %train_id, "skipping overnight direct trip");
        return Ok(None);
    }

    let slice: Vec<&Stop> = stops
        .iter()
        .filter(|s| (board.sequence..=alight.sequence).contains(&s.sequence))
        .collect();

    let mut seen = HashSet::with_capacity(slice.len());
    if !slice.iter().all(|s| seen.insert(s.station)) {
        trace!(train = %train_id, "skipping looping train");
        return Ok(None);
    }

    let train = repo.train(train_id)?;
    let mut leg_stops = Vec::with_capacity(slice.len());
    for stop in slice {
        let station = repo.station(stop.station)?;
        leg_stops.push(LegStop {
            station: station.id,
            name_fr: station.name_fr.clone(),
            name_ar: station.name_ar.clone(),
            time: stop.departure_time,
            sequence: stop.sequence,
        });
    }

    Ok(Some(Leg::new(train, leg_stops)?))
}

fn first_stop_at(stops: &[Stop], station: StationId) -> Option<&Stop> {
    stops.iter().find(|s| s.station == station)
}
