//! Daily tracked state
//!
//! A [`Day`] is created once per calendar date from the profile, then changed
//! only through [`DayPatch`] merges. Targets are fixed at creation and move only
//! when the plan is explicitly regenerated.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::health_metrics::{daily_energy_target, hydration_target, ActivityLevel};
use crate::meal_plan::{generate_meal_plan, MealPlan};
use crate::models::{Meal, Profile};

/// Fraction of each target a day must reach to count as complete
pub const COMPLETION_THRESHOLD: f64 = 0.9;

/// Baseline metrics seeded into a fresh day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDefaults {
    pub sleep_pct: f64,
    pub sitting_hrs: f64,
    pub starting_steps: u32,
    pub sedentary_step_goal: u32,
    pub step_goal: u32,
}

impl Default for DayDefaults {
    fn default() -> Self {
        Self {
            sleep_pct: 75.0,
            sitting_hrs: 6.0,
            starting_steps: 0,
            sedentary_step_goal: crate::health_metrics::SEDENTARY_STEP_GOAL,
            step_goal: crate::health_metrics::ACTIVE_STEP_GOAL,
        }
    }
}

impl DayDefaults {
    pub fn step_goal_for(&self, activity: ActivityLevel) -> u32 {
        match activity {
            ActivityLevel::Sedentary => self.sedentary_step_goal,
            _ => self.step_goal,
        }
    }
}

/// One calendar date of tracked metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date: NaiveDate,
    pub sleep_pct: f64,
    pub sitting_hrs: f64,
    pub steps: u32,
    pub steps_goal: u32,
    pub water_ml: i32,
    pub water_target: i32,
    pub kcal_consumed: i32,
    pub kcal_target: i32,
    pub meals: Vec<Meal>,
    pub snacks: Vec<Meal>,
    pub prayer_done: bool,
    pub workout_done: bool,
    /// Meals already counted toward `kcal_consumed`
    #[serde(default)]
    pub eaten_meal_ids: Vec<String>,
    /// Set once this date has been counted toward the streak
    #[serde(default)]
    pub streak_counted: bool,
}

impl Day {
    /// Fresh day for `date` using the built-in baselines
    pub fn create(profile: &Profile, date: NaiveDate) -> Self {
        Self::create_with(profile, date, &DayDefaults::default(), &mut rand::thread_rng())
    }

    /// Fresh day for `date` with explicit baselines and RNG
    pub fn create_with<R: Rng + ?Sized>(
        profile: &Profile,
        date: NaiveDate,
        defaults: &DayDefaults,
        rng: &mut R,
    ) -> Self {
        let kcal_target = daily_energy_target(profile);
        let plan = generate_meal_plan(kcal_target.max(0) as u32, profile.goal, rng);

        Self {
            date,
            sleep_pct: defaults.sleep_pct,
            sitting_hrs: defaults.sitting_hrs,
            steps: defaults.starting_steps,
            steps_goal: defaults.step_goal_for(profile.activity),
            water_ml: 0,
            water_target: hydration_target(profile),
            kcal_consumed: 0,
            kcal_target,
            meals: plan.meals,
            snacks: plan.snacks,
            prayer_done: false,
            workout_done: false,
            eaten_meal_ids: Vec::new(),
            streak_counted: false,
        }
    }

    /// Pure merge of a patch into this day
    pub fn apply(&self, patch: DayPatch) -> Day {
        let mut next = self.clone();
        if let Some(v) = patch.sleep_pct {
            next.sleep_pct = v;
        }
        if let Some(v) = patch.sitting_hrs {
            next.sitting_hrs = v;
        }
        if let Some(v) = patch.steps {
            next.steps = v;
        }
        if let Some(v) = patch.steps_goal {
            next.steps_goal = v;
        }
        if let Some(v) = patch.water_ml {
            next.water_ml = v;
        }
        if let Some(v) = patch.water_target {
            next.water_target = v;
        }
        if let Some(v) = patch.kcal_consumed {
            next.kcal_consumed = v;
        }
        if let Some(v) = patch.kcal_target {
            next.kcal_target = v;
        }
        if let Some(v) = patch.meals {
            next.meals = v;
        }
        if let Some(v) = patch.snacks {
            next.snacks = v;
        }
        if let Some(v) = patch.prayer_done {
            next.prayer_done = v;
        }
        if let Some(v) = patch.workout_done {
            next.workout_done = v;
        }
        if let Some(v) = patch.eaten_meal_ids {
            next.eaten_meal_ids = v;
        }
        if let Some(v) = patch.streak_counted {
            next.streak_counted = v;
        }
        next
    }

    /// Complete iff water and steps both reach 90% of target.
    /// Calories play no part in completion.
    pub fn is_complete(&self) -> bool {
        self.water_ml as f64 >= COMPLETION_THRESHOLD * self.water_target as f64
            && self.steps as f64 >= COMPLETION_THRESHOLD * self.steps_goal as f64
    }

    /// Find a main meal or snack by id
    pub fn find_meal(&self, meal_id: &str) -> Option<&Meal> {
        self.meals
            .iter()
            .chain(self.snacks.iter())
            .find(|m| m.id == meal_id)
    }

    pub fn is_meal_eaten(&self, meal_id: &str) -> bool {
        self.eaten_meal_ids.iter().any(|id| id == meal_id)
    }

    pub fn remaining_kcal(&self) -> i32 {
        self.kcal_target - self.kcal_consumed
    }
}

/// Partial update of a [`Day`].
///
/// Unknown fields are rejected when a patch is deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DayPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sitting_hrs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_goal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_ml: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_target: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcal_consumed: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcal_target: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals: Option<Vec<Meal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snacks: Option<Vec<Meal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prayer_done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eaten_meal_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_counted: Option<bool>,
}

impl DayPatch {
    pub fn add_water(day: &Day, ml: i32) -> Self {
        Self {
            water_ml: Some(day.water_ml.saturating_add(ml)),
            ..Self::default()
        }
    }

    pub fn add_steps(day: &Day, steps: u32) -> Self {
        Self {
            steps: Some(day.steps.saturating_add(steps)),
            ..Self::default()
        }
    }

    /// Count a meal's energy once; `None` when the id is not part of the day
    pub fn eat_meal(day: &Day, meal_id: &str) -> Option<Self> {
        let meal = day.find_meal(meal_id)?;
        if day.is_meal_eaten(meal_id) {
            return Some(Self::default());
        }
        let mut eaten = day.eaten_meal_ids.clone();
        eaten.push(meal.id.clone());
        Some(Self {
            kcal_consumed: Some(day.kcal_consumed.saturating_add(meal.kcal as i32)),
            eaten_meal_ids: Some(eaten),
            ..Self::default()
        })
    }

    pub fn prayer(done: bool) -> Self {
        Self {
            prayer_done: Some(done),
            ..Self::default()
        }
    }

    pub fn workout(done: bool) -> Self {
        Self {
            workout_done: Some(done),
            ..Self::default()
        }
    }

    pub fn sleep(sleep_pct: f64, sitting_hrs: f64) -> Self {
        Self {
            sleep_pct: Some(sleep_pct),
            sitting_hrs: Some(sitting_hrs),
            ..Self::default()
        }
    }

    pub fn mark_streak_counted() -> Self {
        Self {
            streak_counted: Some(true),
            ..Self::default()
        }
    }

    /// Replace both dish lists; eaten markers refer to the old dishes and are cleared
    pub fn replace_plan(plan: MealPlan) -> Self {
        Self {
            meals: Some(plan.meals),
            snacks: Some(plan.snacks),
            eaten_meal_ids: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Re-derive targets and dishes after a profile edit
    pub fn retarget<R: Rng + ?Sized>(profile: &Profile, defaults: &DayDefaults, rng: &mut R) -> Self {
        let kcal_target = daily_energy_target(profile);
        let plan = generate_meal_plan(kcal_target.max(0) as u32, profile.goal, rng);
        Self {
            kcal_target: Some(kcal_target),
            water_target: Some(hydration_target(profile)),
            steps_goal: Some(defaults.step_goal_for(profile.activity)),
            ..Self::replace_plan(plan)
        }
    }
}

/// Next streak value after a completion check.
///
/// Unchanged when the day is incomplete; otherwise extends the run when the
/// previous calendar day has a stored record and restarts at 1 when it does not.
pub fn update_streak(current: u32, day_complete: bool, had_prior_day_record: bool) -> u32 {
    if !day_complete {
        return current;
    }
    if had_prior_day_record {
        current.saturating_add(1)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health_metrics::Goal;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn fresh_day() -> Day {
        Day::create_with(&Profile::default(), date(), &DayDefaults::default(), &mut StdRng::seed_from_u64(9))
    }

    #[test]
    fn test_create_day_targets_and_baselines() {
        let day = fresh_day();
        assert_eq!(day.kcal_target, 2183);
        assert_eq!(day.water_target, 3350);
        assert_eq!(day.steps_goal, 10_000);
        assert_eq!(day.meals.len(), 3);
        assert_eq!(day.snacks.len(), 2);
        assert_eq!(day.water_ml, 0);
        assert_eq!(day.kcal_consumed, 0);
        assert!(!day.prayer_done && !day.workout_done);
        assert_eq!(day.sleep_pct, 75.0);
    }

    #[test]
    fn test_sedentary_gets_lower_step_goal() {
        let profile = Profile { activity: ActivityLevel::Sedentary, ..Profile::default() };
        let day = Day::create(&profile, date());
        assert!(day.steps_goal < fresh_day().steps_goal);
    }

    #[test]
    fn test_apply_only_touches_patched_fields() {
        let day = fresh_day();
        let next = day.apply(DayPatch::add_water(&day, 500));
        assert_eq!(next.water_ml, 500);
        assert_eq!(Day { water_ml: 0, ..next.clone() }, day);
    }

    #[test]
    fn test_eat_meal_counts_once() {
        let day = fresh_day();
        let id = day.meals[1].id.clone();
        let once = day.apply(DayPatch::eat_meal(&day, &id).unwrap());
        let twice = once.apply(DayPatch::eat_meal(&once, &id).unwrap());
        assert_eq!(once.kcal_consumed, day.meals[1].kcal as i32);
        assert_eq!(twice.kcal_consumed, once.kcal_consumed);
        assert!(DayPatch::eat_meal(&day, "missing").is_none());
    }

    #[test]
    fn test_replace_plan_preserves_other_fields() {
        let mut rng = StdRng::seed_from_u64(11);
        let day = fresh_day().apply(DayPatch { water_ml: Some(900), prayer_done: Some(true), ..DayPatch::default() });
        let plan = generate_meal_plan(day.kcal_target as u32, Goal::Cut, &mut rng);
        let next = day.apply(DayPatch::replace_plan(plan));
        assert_ne!(next.meals, day.meals);
        assert_eq!(next.water_ml, 900);
        assert!(next.prayer_done);
        assert_eq!(next.kcal_target, day.kcal_target);
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let result: Result<DayPatch, _> = serde_json::from_str(r#"{"waterMl": 10, "mood": 3}"#);
        assert!(result.is_err());
        let ok: DayPatch = serde_json::from_str(r#"{"waterMl": 10}"#).unwrap();
        assert_eq!(ok.water_ml, Some(10));
    }

    #[test]
    fn test_completion_threshold() {
        let day = fresh_day();
        let almost = day.apply(DayPatch { water_ml: Some(3020), steps: Some(9050), ..DayPatch::default() });
        assert!(almost.is_complete());
        let short = day.apply(DayPatch { water_ml: Some(3000), steps: Some(9050), ..DayPatch::default() });
        assert!(!short.is_complete());
        let no_steps = day.apply(DayPatch { water_ml: Some(4000), steps: Some(8950), ..DayPatch::default() });
        assert!(!no_steps.is_complete());
    }

    #[test]
    fn test_calories_do_not_affect_completion() {
        let day = fresh_day().apply(DayPatch {
            water_ml: Some(3350),
            steps: Some(10_000),
            kcal_consumed: Some(0),
            ..DayPatch::default()
        });
        assert!(day.is_complete());
    }

    #[test]
    fn test_day_json_roundtrip() {
        let day = fresh_day();
        let json = serde_json::to_string(&day).unwrap();
        assert!(json.contains("\"kcalTarget\""));
        assert!(json.contains("\"date\":\"2026-03-14\""));
        let back: Day = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
    }

    #[test]
    fn test_streak_marker_defaults_for_older_records() {
        let mut json = serde_json::to_value(fresh_day()).unwrap();
        json.as_object_mut().unwrap().remove("streakCounted");
        let day: Day = serde_json::from_value(json).unwrap();
        assert!(!day.streak_counted);

        let marked = day.apply(DayPatch::mark_streak_counted());
        assert!(marked.streak_counted);
        assert_eq!(Day { streak_counted: false, ..marked }, day);
    }

    #[test]
    fn test_streak_rules() {
        assert_eq!(update_streak(7, false, true), 7);
        assert_eq!(update_streak(7, true, true), 8);
        assert_eq!(update_streak(7, true, false), 1);
        assert_eq!(update_streak(0, true, true), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_streak_reset_without_prior_record(current in 0u32..10_000) {
            prop_assert_eq!(update_streak(current, true, false), 1);
        }

        #[test]
        fn prop_incomplete_day_keeps_streak(current in 0u32..10_000, prior in any::<bool>()) {
            prop_assert_eq!(update_streak(current, false, prior), current);
        }
    }
}
