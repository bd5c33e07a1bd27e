//! AIQO Shared Library
//!
//! Pure domain logic for the daily companion: targets, meal plans, the day
//! record, scoring, nudges and timers. Nothing in this crate performs I/O.

pub mod dashboard;
pub mod day;
pub mod errors;
pub mod format;
pub mod health_metrics;
pub mod meal_plan;
pub mod models;
pub mod recommendations;
pub mod timer;
pub mod validation;

// Re-export commonly used items
pub use dashboard::Dashboard;
pub use day::{update_streak, Day, DayDefaults, DayPatch};
pub use errors::*;
pub use format::{format_countdown, format_duration};
pub use health_metrics::*;
pub use meal_plan::{generate_meal_plan, generate_meal_plan_random, MealPlan, MealSlot};
pub use models::{DietaryPreferences, JournalEntry, Macros, Meal, MealTimes, Profile, SleepWindow};
pub use recommendations::{select_nudge, wellness_score, Nudge, WellnessBreakdown};
pub use timer::{Countdown, TimerKind};
pub use validation::ValidationError;
