//! Values the presentation layer renders for the current day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::recommendations::{percent_of, select_nudge, wellness_score, Nudge};

/// Computed view of a [`Day`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub date: NaiveDate,
    pub wellness_score: u8,
    /// Negative once the target has been exceeded
    pub remaining_kcal: i32,
    pub water_percent: u8,
    pub steps_percent: u8,
    pub complete: bool,
    pub streak: u32,
    pub nudge: Nudge,
    pub nudge_message: String,
}

impl Dashboard {
    pub fn from_day(day: &Day, streak: u32) -> Self {
        let nudge = select_nudge(day);
        Self {
            date: day.date,
            wellness_score: wellness_score(day),
            remaining_kcal: day.remaining_kcal(),
            water_percent: display_percent(day.water_ml as f64, day.water_target as f64),
            steps_percent: display_percent(day.steps as f64, day.steps_goal as f64),
            complete: day.is_complete(),
            streak,
            nudge,
            nudge_message: nudge.message().to_string(),
        }
    }
}

fn display_percent(value: f64, target: f64) -> u8 {
    percent_of(value, target).round().clamp(0.0, 100.0) as u8
}
