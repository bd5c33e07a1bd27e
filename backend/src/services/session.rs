//! Daily session context
//!
//! [`DailySession`] owns everything the running companion tracks for one
//! calendar date: the profile, the current [`Day`], and the streak. Every
//! mutation is expressed as a [`DayPatch`], applied to produce the next day,
//! installed in memory and then written to the store.
//!
//! A failed write leaves the new value in memory, marks it dirty and returns
//! a recoverable [`AppError::Storage`]. [`DailySession::flush`] retries every
//! dirty record.

use aiqo_shared::validation::{
    validate_percentage, validate_profile, validate_sitting_hours, validate_step_entry,
    validate_water_entry,
};
use aiqo_shared::{
    generate_meal_plan, update_streak, Dashboard, Day, DayDefaults, DayPatch, Meal, Profile,
    ValidationError,
};
use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::repositories::{DayRepository, ProfileRepository, StreakRepository};
use crate::services::DayService;
use crate::state::AppState;
use crate::storage::SharedStore;

/// Records whose latest in-memory value has not reached the store
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Dirty {
    profile: bool,
    day: bool,
    streak: bool,
}

impl Dirty {
    fn any(&self) -> bool {
        self.profile || self.day || self.streak
    }
}

/// Profile, day and streak for one calendar date, backed by the store
pub struct DailySession {
    store: SharedStore,
    defaults: DayDefaults,
    profile: Profile,
    day: Day,
    streak: u32,
    dirty: Dirty,
}

impl DailySession {
    /// Load the profile and streak, then load or create the day for `today`
    pub async fn open(state: &AppState, today: NaiveDate) -> AppResult<Self> {
        let store = state.store.clone();
        let defaults = state.config().day.clone();

        let profile = ProfileRepository::load(store.as_ref()).await?;
        let day = DayService::load_or_create_with(store.as_ref(), today, &profile, &defaults).await?;
        let streak = StreakRepository::load(store.as_ref()).await?;

        tracing::info!(
            date = %today,
            streak,
            kcal_target = day.kcal_target,
            "Session opened"
        );

        Ok(Self {
            store,
            defaults,
            profile,
            day,
            streak,
            dirty: Dirty::default(),
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn day(&self) -> &Day {
        &self.day
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Whether any record still awaits a successful write
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty.any()
    }

    /// Look up one of today's dishes
    pub fn meal(&self, meal_id: &str) -> AppResult<&Meal> {
        self.day
            .find_meal(meal_id)
            .ok_or_else(|| AppError::NotFound(format!("Meal {}", meal_id)))
    }

    /// Replace the profile and re-derive today's targets and dishes
    pub async fn update_profile(&mut self, profile: Profile) -> AppResult<&Day> {
        validate_profile(&profile)?;

        let patch = DayPatch::retarget(&profile, &self.defaults, &mut rand::thread_rng());
        self.profile = profile;
        self.day = self.day.apply(patch);
        tracing::info!(
            kcal_target = self.day.kcal_target,
            water_target = self.day.water_target,
            "Profile updated, day retargeted"
        );

        self.dirty.profile = true;
        self.dirty.day = true;
        self.flush().await?;
        Ok(&self.day)
    }

    pub async fn add_water(&mut self, ml: i32) -> AppResult<&Day> {
        validate_water_entry(ml).map_err(|m| ValidationError::new("water_ml", &m))?;
        tracing::debug!(ml, "Adding water");
        self.commit(DayPatch::add_water(&self.day, ml)).await
    }

    pub async fn add_steps(&mut self, steps: u32) -> AppResult<&Day> {
        validate_step_entry(steps).map_err(|m| ValidationError::new("steps", &m))?;
        tracing::debug!(steps, "Adding steps");
        self.commit(DayPatch::add_steps(&self.day, steps)).await
    }

    /// Count a dish's energy toward today; eating the same dish twice is a no-op
    pub async fn eat_meal(&mut self, meal_id: &str) -> AppResult<&Day> {
        let patch = DayPatch::eat_meal(&self.day, meal_id)
            .ok_or_else(|| AppError::NotFound(format!("Meal {}", meal_id)))?;

        if patch == DayPatch::default() {
            tracing::debug!(meal_id, "Meal already eaten");
            return Ok(&self.day);
        }

        tracing::debug!(meal_id, "Meal eaten");
        self.commit(patch).await
    }

    pub async fn set_prayer(&mut self, done: bool) -> AppResult<&Day> {
        tracing::debug!(done, "Prayer toggled");
        self.commit(DayPatch::prayer(done)).await
    }

    pub async fn set_workout(&mut self, done: bool) -> AppResult<&Day> {
        tracing::debug!(done, "Workout toggled");
        self.commit(DayPatch::workout(done)).await
    }

    pub async fn log_sleep(&mut self, sleep_pct: f64, sitting_hrs: f64) -> AppResult<&Day> {
        validate_percentage(sleep_pct).map_err(|m| ValidationError::new("sleep_pct", &m))?;
        validate_sitting_hours(sitting_hrs).map_err(|m| ValidationError::new("sitting_hrs", &m))?;
        tracing::debug!(sleep_pct, sitting_hrs, "Sleep logged");
        self.commit(DayPatch::sleep(sleep_pct, sitting_hrs)).await
    }

    /// Draw a fresh set of dishes for the current energy target
    pub async fn regenerate_meals(&mut self) -> AppResult<&Day> {
        let plan = generate_meal_plan(
            self.day.kcal_target.max(0) as u32,
            self.profile.goal,
            &mut rand::thread_rng(),
        );
        tracing::debug!(total_kcal = plan.total_kcal(), "Meals regenerated");
        self.commit(DayPatch::replace_plan(plan)).await
    }

    /// Evaluate completion and update the streak
    ///
    /// A date contributes to the streak at most once; the marker is stored on
    /// the day record together with the new streak. Returns the streak after
    /// evaluation.
    pub async fn complete_day(&mut self) -> AppResult<u32> {
        let date = self.day.date;
        if self.day.streak_counted {
            tracing::debug!(%date, "Day already counted toward streak");
            return Ok(self.streak);
        }

        let complete = self.day.is_complete();
        if !complete {
            tracing::debug!(%date, "Day not complete, streak unchanged");
            return Ok(self.streak);
        }

        let had_prior = DayService::has_prior_day_record(self.store.as_ref(), date).await?;
        self.streak = update_streak(self.streak, complete, had_prior);
        self.day = self.day.apply(DayPatch::mark_streak_counted());
        tracing::info!(%date, streak = self.streak, had_prior, "Day complete");

        self.dirty.day = true;
        self.dirty.streak = true;
        self.flush().await?;
        Ok(self.streak)
    }

    /// Presentation values for the current day
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_day(&self.day, self.streak)
    }

    /// Write every dirty record; stops at the first failure
    pub async fn flush(&mut self) -> AppResult<()> {
        if self.dirty.profile {
            ProfileRepository::save(self.store.as_ref(), &self.profile)
                .await
                .map_err(|e| Self::storage_failure("profile", e))?;
            self.dirty.profile = false;
        }
        if self.dirty.day {
            DayRepository::put(self.store.as_ref(), &self.day)
                .await
                .map_err(|e| Self::storage_failure("day", e))?;
            self.dirty.day = false;
        }
        if self.dirty.streak {
            StreakRepository::save(self.store.as_ref(), self.streak)
                .await
                .map_err(|e| Self::storage_failure("streak", e))?;
            self.dirty.streak = false;
        }
        Ok(())
    }

    async fn commit(&mut self, patch: DayPatch) -> AppResult<&Day> {
        self.day = self.day.apply(patch);
        self.dirty.day = true;
        self.flush().await?;
        Ok(&self.day)
    }

    fn storage_failure(record: &str, err: anyhow::Error) -> AppError {
        tracing::error!(record, error = %err, "Failed to persist record; kept in memory");
        AppError::Storage(err)
    }
}
