//! Server shared state
//!
//! Holds configuration for the HTTP server. Each request builds its own
//! search from a config snapshot, so no search state is shared.

use crate::config::Config;
use crate::error::Result;
use crate::peaks::overpass::OverpassClient;
use crate::peaks::{get_peak_source, PeakSearch};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    started: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            started: Instant::now(),
        }
    }

    /// Snapshot of the current configuration
    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }

    /// Build a peak search from the current configuration
    pub async fn peak_search(&self) -> Result<PeakSearch<OverpassClient>> {
        let config = self.config.read().await;
        let source = get_peak_source(&config.search)?;
        PeakSearch::from_config(source, &config.search)
    }

    /// Seconds since the server started
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
