//! Domain error types.
//!
//! These errors represent validation failures when building legs and
//! itineraries. They are distinct from data-loading and request errors.

use super::StationId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Invalid leg construction (e.g., destination before origin)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// The two legs of a connection do not meet at one station
    #[error("legs do not meet: first ends at {arrives_at}, second starts at {departs_from}")]
    LegsDoNotMeet {
        arrives_at: StationId,
        departs_from: StationId,
    },

    /// Both legs of a connection are on the same train
    #[error("connection uses train {0} for both legs")]
    SameTrain(String),

    /// The transfer station is the overall origin or destination
    #[error("station {0} cannot be both an endpoint and the transfer point")]
    TransferAtEndpoint(StationId),
}
