//! Transfer station discovery.

use std::collections::BTreeSet;

use tracing::trace;

use crate::domain::StationId;
use crate::network::NetworkRepository;

/// Candidate stations for changing trains between `origin` and
/// `destination`.
///
/// A candidate is visited by some train through the origin and by some
/// train through the destination, and is neither endpoint. Stations whose
/// French name appears in `hubs` come first in hub order; the remaining
/// candidates follow by ascending id.
pub fn transfer_candidates<R: NetworkRepository + ?Sized>(
    repo: &R,
    origin: StationId,
    destination: StationId,
    hubs: &[String],
) -> Vec<StationId> {
    let reachable = stations_served_with(repo, origin);
    let feeders = stations_served_with(repo, destination);

    let mut rest: BTreeSet<StationId> = reachable
        .intersection(&feeders)
        .copied()
        .filter(|s| *s != origin && *s != destination)
        .collect();

    let mut ordered = Vec::with_capacity(rest.len());
    for hub in hubs {
        let found = rest
            .iter()
            .copied()
            .find(|id| repo.station(*id).is_ok_and(|s| &s.name_fr == hub));
        if let Some(id) = found {
            rest.remove(&id);
            ordered.push(id);
        }
    }
    ordered.extend(rest);

    trace!(%origin, %destination, candidates = ordered.len(), "transfer candidates");
    ordered
}

/// Every station visited by any train that calls at `station`.
fn stations_served_with<R: NetworkRepository + ?Sized>(
    repo: &R,
    station: StationId,
) -> BTreeSet<StationId> {
    repo.trains_through_station(station)
        .iter()
        .filter_map(|train| repo.stops_for_train(*train).ok())
        .flat_map(|stops| stops.iter().map(|s| s.station))
        .collect()
}
