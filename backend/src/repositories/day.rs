//! Day record repository

use aiqo_shared::Day;
use anyhow::Result;
use chrono::NaiveDate;

use crate::storage::keys::day_key;
use crate::storage::KeyValueStore;

/// Day records stored under `aiqo_day_<date>`
pub struct DayRepository;

impl DayRepository {
    /// Stored day for `date`; `None` when absent or unreadable
    pub async fn get(store: &dyn KeyValueStore, date: NaiveDate) -> Result<Option<Day>> {
        let Some(raw) = store.get(&day_key(date)).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Day>(&raw) {
            Ok(day) => Ok(Some(day)),
            Err(e) => {
                tracing::warn!(%date, error = %e, "Stored day record is malformed, ignoring it");
                Ok(None)
            }
        }
    }

    pub async fn put(store: &dyn KeyValueStore, day: &Day) -> Result<()> {
        let raw = serde_json::to_string(day)?;
        store.set(&day_key(day.date), &raw).await?;
        tracing::debug!(date = %day.date, "Day record stored");
        Ok(())
    }

    /// Whether any record is stored under the date's key, readable or not
    pub async fn exists(store: &dyn KeyValueStore, date: NaiveDate) -> Result<bool> {
        Ok(store.get(&day_key(date)).await?.is_some())
    }
}
