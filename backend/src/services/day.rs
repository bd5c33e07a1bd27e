//! Day lifecycle with persistence
//!
//! Provides:
//! - Load-or-create of the record for a calendar date
//! - Detection of the preceding day's record for streak evaluation

use aiqo_shared::{Day, DayDefaults, Profile};
use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::repositories::DayRepository;
use crate::storage::KeyValueStore;

/// Loads the day record for a date, creating it on first use
pub struct DayService;

impl DayService {
    /// Stored day for `date`, or a brand-new one persisted immediately
    pub async fn load_or_create(
        store: &dyn KeyValueStore,
        date: NaiveDate,
        profile: &Profile,
    ) -> AppResult<Day> {
        Self::load_or_create_with(store, date, profile, &DayDefaults::default()).await
    }

    /// Same as [`load_or_create`](Self::load_or_create) with configured baselines
    pub async fn load_or_create_with(
        store: &dyn KeyValueStore,
        date: NaiveDate,
        profile: &Profile,
        defaults: &DayDefaults,
    ) -> AppResult<Day> {
        if let Some(day) = DayRepository::get(store, date).await? {
            tracing::debug!(%date, "Loaded stored day");
            return Ok(day);
        }

        // No carry-over from earlier days
        let day = Day::create_with(profile, date, defaults, &mut rand::thread_rng());
        tracing::info!(
            %date,
            kcal_target = day.kcal_target,
            water_target = day.water_target,
            steps_goal = day.steps_goal,
            "Created new day"
        );

        DayRepository::put(store, &day).await.map_err(|e| {
            tracing::error!(%date, error = %e, "Failed to persist new day");
            AppError::Storage(e)
        })?;

        Ok(day)
    }

    /// Whether the calendar day before `date` has a stored record
    pub async fn has_prior_day_record(store: &dyn KeyValueStore, date: NaiveDate) -> AppResult<bool> {
        match date.pred_opt() {
            Some(prior) => Ok(DayRepository::exists(store, prior).await?),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::keys::day_key;
    use crate::storage::MemoryStore;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()
    }

    #[tokio::test]
    async fn test_creates_and_persists_missing_day() {
        let store = MemoryStore::new();
        let day = DayService::load_or_create(&store, date(), &Profile::default())
            .await
            .unwrap();

        assert_eq!(day.date, date());
        assert_eq!(day.kcal_target, 2183);
        assert_eq!(day.water_target, 3350);
        assert_eq!(DayRepository::get(&store, date()).await.unwrap(), Some(day));
    }

    #[tokio::test]
    async fn test_returns_stored_day_unchanged() {
        let store = MemoryStore::new();
        let first = DayService::load_or_create(&store, date(), &Profile::default())
            .await
            .unwrap();
        let again = DayService::load_or_create(&store, date(), &Profile::default())
            .await
            .unwrap();
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn test_malformed_day_is_replaced() {
        let store = MemoryStore::new();
        store.set(&day_key(date()), "{broken").await.unwrap();

        let day = DayService::load_or_create(&store, date(), &Profile::default())
            .await
            .unwrap();
        assert_eq!(day.water_ml, 0);
        assert_eq!(DayRepository::get(&store, date()).await.unwrap(), Some(day));
    }

    #[tokio::test]
    async fn test_configured_baselines() {
        let store = MemoryStore::new();
        let defaults = DayDefaults {
            sleep_pct: 60.0,
            starting_steps: 500,
            ..DayDefaults::default()
        };
        let day = DayService::load_or_create_with(&store, date(), &Profile::default(), &defaults)
            .await
            .unwrap();
        assert_eq!(day.sleep_pct, 60.0);
        assert_eq!(day.steps, 500);
    }

    #[tokio::test]
    async fn test_prior_day_detection() {
        let store = MemoryStore::new();
        assert!(!DayService::has_prior_day_record(&store, date()).await.unwrap());

        let yesterday = date().pred_opt().unwrap();
        DayService::load_or_create(&store, yesterday, &Profile::default())
            .await
            .unwrap();
        assert!(DayService::has_prior_day_record(&store, date()).await.unwrap());
    }
}
