//! Shared application state for the relay.
//!
//! Cheap to clone: everything lives behind `Arc`. The store is held as a
//! trait object so handlers cannot reach the underlying map.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::obs::metrics::RelayMetrics;
use crate::store::{MemoryStore, SampleStore};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<RelayConfig>,
    store: Arc<dyn SampleStore>,
    metrics: Arc<RelayMetrics>,
}

impl AppState {
    /// State backed by a fresh, empty `MemoryStore`.
    pub fn new(cfg: RelayConfig) -> Self {
        Self::with_store(cfg, Arc::new(MemoryStore::new()))
    }

    pub fn with_store(cfg: RelayConfig, store: Arc<dyn SampleStore>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            store,
            metrics: Arc::new(RelayMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &RelayConfig {
        &self.cfg
    }

    pub fn store(&self) -> Arc<dyn SampleStore> {
        Arc::clone(&self.store)
    }

    pub fn metrics(&self) -> Arc<RelayMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Store-derived gauges appended to `/metrics`.
    pub async fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        let series = self.store.len().await as u64;
        vec![("federator_series_stored", series)]
    }
}
