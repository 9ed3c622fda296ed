//! Caching layer for the network index.
//!
//! Building the index means reading and validating the whole dataset, so a
//! built snapshot is kept in a moka cache and shared by every search until
//! the TTL expires. After expiry the next request reloads the source, which
//! picks up edits to the dataset file without a restart. The server also
//! calls [`CachedNetwork::refresh`] on a timer so requests rarely pay for a
//! load, and a broken edit keeps the last good snapshot in service.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, info};

use crate::network::{DatasetError, NetworkDataset, NetworkIndex, SAMPLE_NETWORK_JSON};

/// Where a network snapshot is loaded from.
pub trait NetworkSource: Send + Sync {
    /// Load and validate a fresh index.
    fn load(&self) -> Result<NetworkIndex, DatasetError>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// A JSON dataset on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NetworkSource for FileSource {
    fn load(&self) -> Result<NetworkIndex, DatasetError> {
        NetworkDataset::load(&self.path)?.into_index()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// The sample network compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl NetworkSource for SampleSource {
    fn load(&self) -> Result<NetworkIndex, DatasetError> {
        NetworkDataset::from_json(SAMPLE_NETWORK_JSON)?.into_index()
    }

    fn describe(&self) -> String {
        "bundled sample network".to_string()
    }
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a loaded snapshot is reused.
    pub ttl: Duration,
}

impl CacheConfig {
    /// How often the server reloads the snapshot in the background: twice
    /// per TTL, and never more than once a second.
    pub fn refresh_interval(&self) -> Duration {
        (self.ttl / 2).max(Duration::from_secs(1))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

/// There is only ever one snapshot.
const SNAPSHOT: () = ();

/// Network source with caching.
///
/// Concurrent callers that miss the cache at the same time share a single
/// load. Load failures are returned to every waiting caller and are not
/// cached, so the next call retries.
pub struct CachedNetwork {
    source: Arc<dyn NetworkSource>,
    snapshots: MokaCache<(), Arc<NetworkIndex>>,
}

impl CachedNetwork {
    /// Create a new cached network over `source`.
    pub fn new(source: Arc<dyn NetworkSource>, config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { source, snapshots }
    }

    /// Get the current snapshot, loading it if absent or expired.
    pub async fn snapshot(&self) -> Result<Arc<NetworkIndex>, Arc<DatasetError>> {
        if let Some(index) = self.snapshots.get(&SNAPSHOT).await {
            debug!("network snapshot cache hit");
            return Ok(index);
        }

        self.snapshots.try_get_with(SNAPSHOT, self.load()).await
    }

    /// Reload the source and replace the cached snapshot.
    ///
    /// On failure the current snapshot, if any, stays in place.
    pub async fn refresh(&self) -> Result<Arc<NetworkIndex>, DatasetError> {
        let index = self.load().await?;
        self.snapshots.insert(SNAPSHOT, Arc::clone(&index)).await;
        Ok(index)
    }

    async fn load(&self) -> Result<Arc<NetworkIndex>, DatasetError> {
        info!(source = %self.source.describe(), "loading network snapshot");
        // Reading and validating the dataset blocks
        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || source.load())
            .await?
            .map(Arc::new)
    }

    pub fn source(&self) -> &dyn NetworkSource {
        self.source.as_ref()
    }
}
