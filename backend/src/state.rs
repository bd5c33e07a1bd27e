//! Application state management
//!
//! The store handle and configuration are created once at startup and shared
//! by every session and background task.

use crate::config::AppConfig;
use crate::storage::{KeyValueStore, SharedStore};
use std::sync::Arc;

/// Shared application state
///
/// Both fields are reference counted, so cloning is O(1).
#[derive(Clone)]
pub struct AppState {
    /// Configured key-value backend
    pub store: SharedStore,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: SharedStore, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Get a reference to the store
    #[inline]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
