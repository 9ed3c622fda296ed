//! Web layer for the itinerary search server.
//!
//! Provides JSON endpoints for listing stations and lines and for searching
//! itineraries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
