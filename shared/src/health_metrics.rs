//! Health metrics calculations module
//!
//! Provides the daily target calculations (BMR, energy target, hydration
//! target, step goal) derived from the onboarding profile.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Total Over Enums**: Every activity level and goal maps to exactly one constant
//! 3. **Single Rounding Point**: Energy is rounded once, before the goal offset

use serde::{Deserialize, Serialize};

use crate::models::Profile;

// ============================================================================
// Profile Enums
// ============================================================================

/// Biological sex for health calculations
/// Note: This is used for physiological calculations only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    #[default]
    Male,
    Female,
}

/// Activity level for energy and hydration targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise, physical job or competitive training
    Athlete,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::Athlete,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::Athlete => 1.9,
        }
    }

    /// Extra daily water in ml on top of the weight-based baseline
    pub fn hydration_bump_ml(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 0.0,
            ActivityLevel::Light => 200.0,
            ActivityLevel::Moderate => 400.0,
            ActivityLevel::Active => 600.0,
            ActivityLevel::Athlete => 800.0,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::Athlete => "Very hard exercise or physical job",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "athlete" => Ok(ActivityLevel::Athlete),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// Dietary objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Caloric deficit
    #[default]
    Cut,
    /// Caloric surplus
    Bulk,
    Maintain,
}

impl Goal {
    /// Integer kcal offset applied after the TDEE has been rounded
    pub fn kcal_offset(&self) -> i32 {
        match self {
            Goal::Cut => -400,
            Goal::Bulk => 300,
            Goal::Maintain => 0,
        }
    }
}

// ============================================================================
// BMR and Energy Target
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn basal_metabolic_rate(sex: BiologicalSex, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

/// Calculate Total Daily Energy Expenditure (unrounded)
///
/// TDEE = BMR × Activity Multiplier
pub fn total_daily_energy_expenditure(profile: &Profile) -> f64 {
    let bmr = basal_metabolic_rate(profile.gender, profile.weight, profile.height, profile.age);
    bmr * profile.activity.multiplier()
}

/// Daily kcal target: `round(TDEE)` adjusted by the goal offset
pub fn daily_energy_target(profile: &Profile) -> i32 {
    let tdee = total_daily_energy_expenditure(profile).round() as i32;
    tdee + profile.goal.kcal_offset()
}

// ============================================================================
// Hydration and Movement Targets
// ============================================================================

/// Recommended daily water intake in ml
///
/// Formula: round(weight_kg × 35 + activity bump)
pub fn hydration_target(profile: &Profile) -> i32 {
    (profile.weight * 35.0 + profile.activity.hydration_bump_ml()).round() as i32
}

/// Sedentary profiles get a gentler step goal; all other tiers share one goal
pub const SEDENTARY_STEP_GOAL: u32 = 6_000;
pub const ACTIVE_STEP_GOAL: u32 = 10_000;

/// Daily step goal for an activity tier
pub fn daily_step_goal(activity: ActivityLevel) -> u32 {
    match activity {
        ActivityLevel::Sedentary => SEDENTARY_STEP_GOAL,
        _ => ACTIVE_STEP_GOAL,
    }
}

/// Energy/hydration breakdown for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub kcal_target: i32,
    pub water_target: i32,
    pub steps_goal: u32,
}

/// Calculate every daily target for a profile
pub fn daily_targets(profile: &Profile) -> DailyTargets {
    DailyTargets {
        bmr: basal_metabolic_rate(profile.gender, profile.weight, profile.height, profile.age),
        tdee: total_daily_energy_expenditure(profile),
        kcal_target: daily_energy_target(profile),
        water_target: hydration_target(profile),
        steps_goal: daily_step_goal(profile.activity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn profile(goal: Goal, activity: ActivityLevel) -> Profile {
        Profile {
            gender: BiologicalSex::Male,
            age: 24,
            height: 175.0,
            weight: 90.0,
            goal,
            activity,
            ..Profile::default()
        }
    }

    // =========================================================================
    // BMR Tests
    // =========================================================================

    #[test]
    fn test_bmr_mifflin_known_values() {
        assert_eq!(basal_metabolic_rate(BiologicalSex::Male, 90.0, 175.0, 24), 1878.75);
        assert_eq!(basal_metabolic_rate(BiologicalSex::Female, 60.0, 165.0, 30), 1320.25);
    }

    #[rstest]
    #[case(ActivityLevel::Sedentary, 1.2)]
    #[case(ActivityLevel::Light, 1.375)]
    #[case(ActivityLevel::Moderate, 1.55)]
    #[case(ActivityLevel::Active, 1.725)]
    #[case(ActivityLevel::Athlete, 1.9)]
    fn test_activity_multiplier(#[case] level: ActivityLevel, #[case] expected: f64) {
        assert_eq!(level.multiplier(), expected);
    }

    #[test]
    fn test_activity_level_parsing() {
        assert_eq!("light".parse::<ActivityLevel>().unwrap(), ActivityLevel::Light);
        assert_eq!("ATHLETE".parse::<ActivityLevel>().unwrap(), ActivityLevel::Athlete);
        assert!("lightly_active".parse::<ActivityLevel>().is_err());
    }

    // =========================================================================
    // Energy Target Tests
    // =========================================================================

    #[test]
    fn test_energy_target_reference_profile() {
        let p = profile(Goal::Cut, ActivityLevel::Light);
        let expected = (1878.75f64 * 1.375).round() as i32 - 400;
        assert_eq!(daily_energy_target(&p), expected);
        assert_eq!(daily_energy_target(&p), 2183);
    }

    #[test]
    fn test_goal_offsets_applied_after_rounding() {
        let maintain = daily_energy_target(&profile(Goal::Maintain, ActivityLevel::Light));
        let bulk = daily_energy_target(&profile(Goal::Bulk, ActivityLevel::Light));
        let cut = daily_energy_target(&profile(Goal::Cut, ActivityLevel::Light));
        assert_eq!(bulk - maintain, 300);
        assert_eq!(maintain - cut, 400);
    }

    // =========================================================================
    // Hydration / Steps Tests
    // =========================================================================

    #[test]
    fn test_hydration_reference_profile() {
        assert_eq!(hydration_target(&profile(Goal::Cut, ActivityLevel::Light)), 3350);
    }

    #[rstest]
    #[case(ActivityLevel::Sedentary, 3150)]
    #[case(ActivityLevel::Moderate, 3550)]
    #[case(ActivityLevel::Active, 3750)]
    #[case(ActivityLevel::Athlete, 3950)]
    fn test_hydration_bumps(#[case] level: ActivityLevel, #[case] expected: i32) {
        assert_eq!(hydration_target(&profile(Goal::Maintain, level)), expected);
    }

    #[test]
    fn test_step_goal_tiers() {
        assert_eq!(daily_step_goal(ActivityLevel::Sedentary), SEDENTARY_STEP_GOAL);
        for level in &ActivityLevel::ALL[1..] {
            assert_eq!(daily_step_goal(*level), ACTIVE_STEP_GOAL);
        }
        assert!(SEDENTARY_STEP_GOAL < ACTIVE_STEP_GOAL);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: cut < maintain < bulk with everything else fixed
        #[test]
        fn prop_energy_target_monotonic_in_goal(
            weight in 40.0f64..200.0,
            height in 140.0f64..210.0,
            age in 18u32..80,
            level in prop::sample::select(ActivityLevel::ALL.to_vec()),
            female in any::<bool>()
        ) {
            let base = Profile {
                gender: if female { BiologicalSex::Female } else { BiologicalSex::Male },
                age,
                height,
                weight,
                activity: level,
                ..Profile::default()
            };
            let cut = daily_energy_target(&Profile { goal: Goal::Cut, ..base.clone() });
            let maintain = daily_energy_target(&Profile { goal: Goal::Maintain, ..base.clone() });
            let bulk = daily_energy_target(&Profile { goal: Goal::Bulk, ..base });
            prop_assert!(cut < maintain && maintain < bulk);
        }

        /// Property: more active = more water needed
        #[test]
        fn prop_hydration_increases_with_activity(weight in 40.0f64..200.0) {
            let targets: Vec<i32> = ActivityLevel::ALL
                .iter()
                .map(|level| hydration_target(&Profile { weight, ..profile(Goal::Maintain, *level) }))
                .collect();
            prop_assert!(targets.windows(2).all(|w| w[0] < w[1]));
        }

        /// Property: male BMR > female BMR (same stats)
        #[test]
        fn prop_male_bmr_higher(
            weight in 50.0f64..100.0,
            height in 160.0f64..190.0,
            age in 20u32..60
        ) {
            let male = basal_metabolic_rate(BiologicalSex::Male, weight, height, age);
            let female = basal_metabolic_rate(BiologicalSex::Female, weight, height, age);
            prop_assert!(male > female);
        }
    }
}
