//! Wellness scoring and nudge selection
//!
//! Both functions are deterministic: the same [`Day`] always produces the same
//! score and the same nudge.

use serde::{Deserialize, Serialize};

use crate::day::Day;

const FAITH_DONE: f64 = 100.0;
const FAITH_PENDING: f64 = 30.0;
const SPORT_DONE: f64 = 100.0;
const SPORT_PENDING: f64 = 40.0;

/// Calories still open above which a protein snack is suggested
pub const PROTEIN_SNACK_GAP_KCAL: i32 = 300;
/// Sitting hours above which a posture break is suggested
pub const POSTURE_SITTING_HOURS: f64 = 8.0;

/// `value / target * 100` with a zero target treated as 1
pub(crate) fn percent_of(value: f64, target: f64) -> f64 {
    let denominator = if target == 0.0 { 1.0 } else { target };
    value / denominator * 100.0
}

fn clamp_pct(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Per-dimension sub-scores, each already clamped to 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessBreakdown {
    pub water: f64,
    pub sleep: f64,
    pub steps: f64,
    pub faith: f64,
    pub sport: f64,
}

impl WellnessBreakdown {
    pub fn from_day(day: &Day) -> Self {
        Self {
            water: clamp_pct(percent_of(day.water_ml as f64, day.water_target as f64)),
            sleep: clamp_pct(day.sleep_pct),
            steps: clamp_pct(percent_of(day.steps as f64, day.steps_goal as f64)),
            faith: if day.prayer_done { FAITH_DONE } else { FAITH_PENDING },
            sport: if day.workout_done { SPORT_DONE } else { SPORT_PENDING },
        }
    }

    pub fn mean(&self) -> f64 {
        (self.water + self.sleep + self.steps + self.faith + self.sport) / 5.0
    }
}

/// Composite 0-100 wellness score: rounded mean of the five sub-scores
pub fn wellness_score(day: &Day) -> u8 {
    WellnessBreakdown::from_day(day).mean().round() as u8
}

/// Contextual suggestion, ordered by priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nudge {
    Hydration,
    Movement,
    ProteinSnack,
    Prayer,
    Posture,
    Encouragement,
}

impl Nudge {
    /// Stable token for storage and UI lookup
    pub fn token(&self) -> &'static str {
        match self {
            Nudge::Hydration => "hydration",
            Nudge::Movement => "movement",
            Nudge::ProteinSnack => "protein_snack",
            Nudge::Prayer => "prayer",
            Nudge::Posture => "posture",
            Nudge::Encouragement => "encouragement",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Nudge::Hydration => "You're under half your water target. Grab a glass now.",
            Nudge::Movement => "Less than half your steps so far. A 10 minute walk helps.",
            Nudge::ProteinSnack => "Plenty of calories left today. Try a protein-rich snack.",
            Nudge::Prayer => "Take a quiet moment for prayer.",
            Nudge::Posture => "You've been sitting a long time. Stand up and stretch.",
            Nudge::Encouragement => "Great work today. Keep the momentum going!",
        }
    }
}

impl std::fmt::Display for Nudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// First matching rule wins
pub fn select_nudge(day: &Day) -> Nudge {
    let water_ratio = percent_of(day.water_ml as f64, day.water_target as f64) / 100.0;

    if water_ratio < 0.5 {
        Nudge::Hydration
    } else if (day.steps as f64) < day.steps_goal as f64 / 2.0 {
        Nudge::Movement
    } else if day.kcal_target - day.kcal_consumed > PROTEIN_SNACK_GAP_KCAL {
        Nudge::ProteinSnack
    } else if !day.prayer_done {
        Nudge::Prayer
    } else if day.sitting_hrs > POSTURE_SITTING_HOURS {
        Nudge::Posture
    } else {
        Nudge::Encouragement
    }
}
