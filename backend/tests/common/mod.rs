//! Common test utilities for integration tests
//!
//! Builds an [`AppState`] over each storage backend. File and SQLite stores
//! live in a temp directory that is removed when the harness drops.

#![allow(dead_code)]

use std::sync::Arc;

use aiqo_backend::config::{AppConfig, StorageBackend, StorageConfig};
use aiqo_backend::state::AppState;
use aiqo_backend::storage::{self, MemoryStore};
use aiqo_shared::{ActivityLevel, BiologicalSex, Goal, Profile};
use chrono::NaiveDate;
use fake::Fake;
use tempfile::TempDir;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
    pub config: AppConfig,
    _dir: TempDir,
}

impl TestApp {
    /// Open a fresh store of the given kind
    pub async fn new(backend: StorageBackend) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(&dir, backend);
        let store = storage::open_store(&config.storage)
            .await
            .expect("Failed to open store");
        Self {
            state: AppState::new(store, config.clone()),
            config,
            _dir: dir,
        }
    }

    /// Process-local store only
    pub fn in_memory() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(&dir, StorageBackend::Memory);
        Self {
            state: AppState::new(Arc::new(MemoryStore::new()), config.clone()),
            config,
            _dir: dir,
        }
    }

    /// Drop the current store handle and open the same backend again,
    /// as a restarted process would
    pub async fn restart(self) -> Self {
        let Self { state, config, _dir } = self;
        drop(state);
        let store = storage::open_store(&config.storage)
            .await
            .expect("Failed to reopen store");
        Self {
            state: AppState::new(store, config.clone()),
            config,
            _dir,
        }
    }
}

/// Configuration pointing every backend into `dir`
pub fn test_config(dir: &TempDir, backend: StorageBackend) -> AppConfig {
    AppConfig {
        storage: StorageConfig {
            backend,
            file_path: dir.path().join("aiqo_store.json"),
            sqlite_url: format!("sqlite://{}", dir.path().join("aiqo.db").display()),
        },
        ..AppConfig::default()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A plausible onboarding profile with randomized body metrics
pub fn random_profile() -> Profile {
    Profile {
        gender: if (0..2).fake::<u8>() == 0 {
            BiologicalSex::Male
        } else {
            BiologicalSex::Female
        },
        age: (18..70).fake::<u32>(),
        height: (150.0..200.0).fake::<f64>(),
        weight: (50.0..130.0).fake::<f64>(),
        goal: Goal::Maintain,
        activity: ActivityLevel::Moderate,
        ..Profile::default()
    }
}
