//! Streak counter repository
//!
//! The streak is stored as a decimal string under its own key.

use anyhow::Result;

use crate::storage::keys::STREAK_KEY;
use crate::storage::KeyValueStore;

/// Streak counter stored as a decimal string
pub struct StreakRepository;

impl StreakRepository {
    /// Current streak; 0 when absent or unparseable
    pub async fn load(store: &dyn KeyValueStore) -> Result<u32> {
        let Some(raw) = store.get(STREAK_KEY).await? else {
            return Ok(0);
        };

        match raw.trim().parse::<u32>() {
            Ok(streak) => Ok(streak),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Stored streak is malformed, starting from 0");
                Ok(0)
            }
        }
    }

    pub async fn save(store: &dyn KeyValueStore, streak: u32) -> Result<()> {
        store.set(STREAK_KEY, &streak.to_string()).await
    }
}
