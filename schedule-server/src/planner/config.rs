//! Search configuration for the itinerary planner.

/// What to do when a train record cannot be resolved while validating a
/// connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingTrainPolicy {
    /// Keep the connection as if the check had passed.
    FailOpen,
    /// Reject the connection.
    FailClosed,
}

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Stations tried first as transfer points, by French name, in order.
    pub hub_stations: Vec<String>,

    /// Connections are only searched when fewer direct trips than this
    /// were found.
    pub direct_threshold: usize,

    /// Shortest acceptable wait at the transfer station (minutes).
    pub min_transfer_mins: u32,

    /// Longest acceptable wait at the transfer station (minutes).
    pub max_transfer_mins: u32,

    /// How long before the requested time an itinerary may still depart
    /// (minutes).
    pub lookback_mins: u32,

    /// Score weight of each minute between requested and actual departure.
    pub proximity_weight: u32,

    /// Score added to every connection (minutes).
    pub transfer_penalty_mins: u32,

    /// Itineraries shorter than this get the `Fast` badge (minutes).
    pub fast_threshold_mins: u32,

    /// Maximum number of itineraries to return.
    pub max_results: usize,

    pub missing_train_policy: MissingTrainPolicy,
}

impl SearchConfig {
    /// Create a configuration with the given transfer window and result
    /// limit, other parameters at their defaults.
    pub fn new(min_transfer_mins: u32, max_transfer_mins: u32, max_results: usize) -> Self {
        Self {
            min_transfer_mins,
            max_transfer_mins,
            max_results,
            ..Self::default()
        }
    }

    pub fn with_hubs<S: Into<String>>(mut self, hubs: impl IntoIterator<Item = S>) -> Self {
        self.hub_stations = hubs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_missing_train_policy(mut self, policy: MissingTrainPolicy) -> Self {
        self.missing_train_policy = policy;
        self
    }

    /// Returns true if `wait` minutes is an acceptable transfer.
    pub fn transfer_window_contains(&self, wait: u32) -> bool {
        (self.min_transfer_mins..=self.max_transfer_mins).contains(&wait)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hub_stations: vec!["El Harrach".to_string(), "Birtouta".to_string()],
            direct_threshold: 10,
            min_transfer_mins: 10,
            max_transfer_mins: 180,
            lookback_mins: 60,
            proximity_weight: 10,
            transfer_penalty_mins: 30,
            fast_threshold_mins: 60,
            max_results: 20,
            missing_train_policy: MissingTrainPolicy::FailClosed,
        }
    }
}
