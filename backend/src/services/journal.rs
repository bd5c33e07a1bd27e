//! Journal service
//!
//! One mood/note entry per calendar date. Entries are validated before they
//! are written; unreadable stored entries read as absent.

use aiqo_shared::validation::validate_journal_entry;
use aiqo_shared::JournalEntry;
use chrono::NaiveDate;

use crate::error::AppResult;
use crate::repositories::JournalRepository;
use crate::storage::KeyValueStore;

/// Validated journal entries per date
pub struct JournalService;

impl JournalService {
    /// Validate and store the entry for `date`, replacing any earlier one
    pub async fn save(
        store: &dyn KeyValueStore,
        date: NaiveDate,
        entry: &JournalEntry,
    ) -> AppResult<()> {
        validate_journal_entry(entry)?;
        JournalRepository::put(store, date, entry).await?;
        tracing::debug!(%date, mood = entry.mood, "Journal entry saved");
        Ok(())
    }

    pub async fn load(store: &dyn KeyValueStore, date: NaiveDate) -> AppResult<Option<JournalEntry>> {
        Ok(JournalRepository::get(store, date).await?)
    }

    pub async fn delete(store: &dyn KeyValueStore, date: NaiveDate) -> AppResult<()> {
        JournalRepository::delete(store, date).await?;
        Ok(())
    }
}
