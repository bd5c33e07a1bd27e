//! # Storage
//!
//! A minimal async key-value interface over string keys and string values,
//! with three interchangeable backends. The backend is chosen once at startup
//! from configuration and injected as `Arc<dyn KeyValueStore>`; nothing above
//! this module knows which one is in use.

pub mod file;
pub mod keys;
pub mod memory;
pub mod sqlite;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{StorageBackend, StorageConfig};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Persistence contract consumed by the day lifecycle
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch a value; `None` when the key was never written or was removed
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any prior value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Shared handle to the configured store
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Open the backend named in configuration
pub async fn open_store(config: &StorageConfig) -> Result<SharedStore> {
    let store: SharedStore = match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory store; data will not survive restart");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => {
            tracing::info!(path = %config.file_path.display(), "Opening file store");
            Arc::new(FileStore::open(&config.file_path).await?)
        }
        StorageBackend::Sqlite => {
            tracing::info!(url = %config.sqlite_url, "Opening SQLite store");
            Arc::new(SqliteStore::connect(&config.sqlite_url).await?)
        }
    };
    Ok(store)
}
