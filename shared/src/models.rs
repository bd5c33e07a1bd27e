//! Data models for the AIQO companion
//!
//! Every persisted record serializes with camelCase keys so that stored
//! documents stay readable by the mobile client.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use crate::health_metrics::{ActivityLevel, BiologicalSex, Goal};

/// Preferred local times (`HH:MM`) for the three main meals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealTimes {
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl Default for MealTimes {
    fn default() -> Self {
        Self {
            breakfast: "08:00".to_string(),
            lunch: "13:00".to_string(),
            dinner: "19:00".to_string(),
        }
    }
}

/// Preferred sleep window as local `HH:MM` times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepWindow {
    pub bedtime: String,
    pub wake: String,
}

impl Default for SleepWindow {
    fn default() -> Self {
        Self {
            bedtime: "23:00".to_string(),
            wake: "07:00".to_string(),
        }
    }
}

/// Dietary preference flags collected at onboarding.
///
/// These are display filters only; meal generation ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryPreferences {
    pub halal: bool,
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
    pub lactose_free: bool,
}

impl Default for DietaryPreferences {
    fn default() -> Self {
        Self {
            halal: true,
            vegan: false,
            vegetarian: false,
            gluten_free: false,
            lactose_free: false,
        }
    }
}

/// Onboarding profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub gender: BiologicalSex,
    /// Age in years
    pub age: u32,
    /// Height in centimeters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    pub goal: Goal,
    pub activity: ActivityLevel,
    #[serde(default)]
    pub meal_times: MealTimes,
    #[serde(default)]
    pub sleep_window: SleepWindow,
    #[serde(default)]
    pub diet: DietaryPreferences,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            gender: BiologicalSex::Male,
            age: 24,
            height: 175.0,
            weight: 90.0,
            goal: Goal::Cut,
            activity: ActivityLevel::Light,
            meal_times: MealTimes::default(),
            sleep_window: SleepWindow::default(),
            diet: DietaryPreferences::default(),
        }
    }
}

/// Macro breakdown in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Macros {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

/// A generated meal or snack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Opaque identity token (UUID v4)
    pub id: String,
    pub title: String,
    pub kcal: u32,
    pub macros: Macros,
    pub prep_minutes: u32,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Meal {
    /// Cook timer length for this meal
    pub fn cook_seconds(&self) -> u32 {
        self.prep_minutes.saturating_mul(60)
    }
}

/// Mood scale bounds for journal entries
pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 5;

/// One journal entry per calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub mood: u8,
    pub note: String,
}
