//! Application state for the ledger engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::EngineDefaults;
use crate::ledger::ActivityFeeds;
use crate::store::LedgerStore;

/// Shared application state.
///
/// The store sits behind a single async lock; mutating handlers take the
/// write half for the whole operation, so readers never observe a
/// half-applied mutation.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<LedgerStore>>,
    feeds: Arc<dyn ActivityFeeds>,
    defaults: Arc<EngineDefaults>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        store: LedgerStore,
        feeds: Arc<dyn ActivityFeeds>,
        defaults: EngineDefaults,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            feeds,
            defaults: Arc::new(defaults),
        }
    }

    /// Returns the shared store lock.
    pub fn store(&self) -> &RwLock<LedgerStore> {
        &self.store
    }

    /// Returns the external activity feeds.
    pub fn feeds(&self) -> &Arc<dyn ActivityFeeds> {
        &self.feeds
    }

    /// Returns the engine defaults.
    pub fn defaults(&self) -> &EngineDefaults {
        &self.defaults
    }
}
