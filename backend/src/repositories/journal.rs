//! Journal entry repository

use aiqo_shared::JournalEntry;
use anyhow::Result;
use chrono::NaiveDate;

use crate::storage::keys::journal_key;
use crate::storage::KeyValueStore;

/// Journal entries stored under `aiqo_journal_<date>`
pub struct JournalRepository;

impl JournalRepository {
    pub async fn get(store: &dyn KeyValueStore, date: NaiveDate) -> Result<Option<JournalEntry>> {
        let Some(raw) = store.get(&journal_key(date)).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<JournalEntry>(&raw) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                tracing::warn!(%date, error = %e, "Stored journal entry is malformed, ignoring it");
                Ok(None)
            }
        }
    }

    pub async fn put(store: &dyn KeyValueStore, date: NaiveDate, entry: &JournalEntry) -> Result<()> {
        let raw = serde_json::to_string(entry)?;
        store.set(&journal_key(date), &raw).await
    }

    pub async fn delete(store: &dyn KeyValueStore, date: NaiveDate) -> Result<()> {
        store.remove(&journal_key(date)).await
    }
}
