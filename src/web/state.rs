//! Application state shared across handlers

use crate::bulk::BulkUpserter;
use crate::config::Settings;
use crate::search::SearchCoordinator;
use crate::store::DocumentStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search fan-out coordinator
    pub search: Arc<SearchCoordinator>,
    /// Bulk upsert orchestrator
    pub upserter: Arc<BulkUpserter>,
}

impl AppState {
    /// Create new application state around one shared store client.
    pub fn new(settings: Settings, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            search: Arc::new(SearchCoordinator::new(store.clone())),
            upserter: Arc::new(BulkUpserter::new(store)),
        }
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
