//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedNetwork;
use crate::planner::SearchConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached network snapshot
    pub network: Arc<CachedNetwork>,

    /// Itinerary search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: CachedNetwork, config: SearchConfig) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
        }
    }
}
