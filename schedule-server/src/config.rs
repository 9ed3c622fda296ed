//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::cache::{CacheConfig, FileSource, NetworkSource, SampleSource};

pub const BIND_ADDR_VAR: &str = "SCHEDULE_BIND_ADDR";
pub const DATA_PATH_VAR: &str = "SCHEDULE_DATA_PATH";
pub const CACHE_TTL_VAR: &str = "SCHEDULE_CACHE_TTL_SECS";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Dataset file. `None` serves the bundled sample network.
    pub data_path: Option<PathBuf>,

    /// Network snapshot cache settings.
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_path: None,
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Unset or empty variables use the default; unparseable values are
    /// logged and also fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = get(BIND_ADDR_VAR) {
            match raw.trim().parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => warn!(
                    var = BIND_ADDR_VAR,
                    value = %raw,
                    error = %e,
                    "invalid bind address, using default"
                ),
            }
        }

        if let Some(raw) = get(DATA_PATH_VAR) {
            config.data_path = Some(PathBuf::from(raw));
        }

        if let Some(raw) = get(CACHE_TTL_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.cache.ttl = Duration::from_secs(secs),
                Err(e) => warn!(
                    var = CACHE_TTL_VAR,
                    value = %raw,
                    error = %e,
                    "invalid cache TTL, using default"
                ),
            }
        }

        config
    }

    /// The network source this configuration points at.
    pub fn network_source(&self) -> Arc<dyn NetworkSource> {
        match &self.data_path {
            Some(path) => Arc::new(FileSource::new(path)),
            None => Arc::new(SampleSource),
        }
    }
}
