//! Meal plan generation
//!
//! Builds a randomized day of three main meals and two snacks whose energy
//! approximates the daily target. The pantry is fixed and fully halal, which is
//! why every generated dish carries the `halal` tag.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::health_metrics::Goal;
use crate::models::{Macros, Meal};

/// Share of the day's energy assigned to the three main meals
pub const MAIN_MEAL_SHARE: f64 = 0.75;
pub const MAIN_MEAL_COUNT: usize = 3;
pub const SNACK_COUNT: usize = 2;

/// Preparation time range in minutes, upper bound exclusive
pub const PREP_MINUTES_MIN: u32 = 15;
pub const PREP_MINUTES_MAX: u32 = 30;

pub const PROTEINS: &[&str] = &[
    "Chicken breast",
    "Lean beef",
    "Lamb",
    "Salmon",
    "Eggs",
    "Turkey",
    "Tuna",
    "Lentils",
];

pub const CARBS: &[&str] = &[
    "Basmati rice",
    "Quinoa",
    "Rolled oats",
    "Sweet potato",
    "Whole wheat pita",
    "Bulgur",
    "Potatoes",
];

pub const FATS: &[&str] = &[
    "Olive oil",
    "Avocado",
    "Almonds",
    "Walnuts",
    "Tahini",
    "Peanut butter",
];

pub const VEGETABLES: &[&str] = &[
    "Spinach",
    "Broccoli",
    "Tomato",
    "Cucumber",
    "Bell pepper",
    "Zucchini",
    "Carrot",
    "Kale",
];

/// Position of a dish within the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const MAIN: [MealSlot; MAIN_MEAL_COUNT] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    /// Fixed macro split per slot, independent of kcal
    pub fn macros(&self) -> Macros {
        match self {
            MealSlot::Breakfast => Macros { protein: 30, carbs: 45, fat: 15 },
            MealSlot::Lunch => Macros { protein: 40, carbs: 55, fat: 18 },
            MealSlot::Dinner => Macros { protein: 40, carbs: 40, fat: 20 },
            MealSlot::Snack => Macros { protein: 15, carbs: 20, fat: 8 },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
        }
    }
}

/// A full day of generated dishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    pub meals: Vec<Meal>,
    pub snacks: Vec<Meal>,
}

impl MealPlan {
    pub fn total_kcal(&self) -> u32 {
        self.meals.iter().chain(self.snacks.iter()).map(|m| m.kcal).sum()
    }
}

/// Split the day's energy into per-meal and per-snack kcal
///
/// Each share is rounded independently, so the five values need not sum to
/// exactly `day_kcal`.
pub fn split_energy(day_kcal: u32) -> (u32, u32) {
    let main_pool = (day_kcal as f64 * MAIN_MEAL_SHARE).round() as u32;
    let snack_pool = day_kcal - main_pool;
    let per_meal = (main_pool as f64 / MAIN_MEAL_COUNT as f64).round() as u32;
    let per_snack = (snack_pool as f64 / SNACK_COUNT as f64).round() as u32;
    (per_meal, per_snack)
}

/// Generate a day's meal plan.
///
/// The goal does not change the macro split under the current policy.
pub fn generate_meal_plan<R: Rng + ?Sized>(day_kcal: u32, _goal: Goal, rng: &mut R) -> MealPlan {
    let (per_meal, per_snack) = split_energy(day_kcal);
    let dish_count = MAIN_MEAL_COUNT + SNACK_COUNT;

    let proteins: Vec<&str> = PROTEINS.choose_multiple(rng, dish_count).copied().collect();
    let carbs: Vec<&str> = CARBS.choose_multiple(rng, dish_count).copied().collect();
    let fats: Vec<&str> = FATS.choose_multiple(rng, dish_count).copied().collect();

    let mut picks = proteins
        .into_iter()
        .zip(carbs)
        .zip(fats)
        .map(|((protein, carb), fat)| PantryPick { protein, carb, fat });

    let meals = MealSlot::MAIN
        .iter()
        .zip(picks.by_ref())
        .map(|(slot, pick)| build_meal(*slot, per_meal, pick, rng))
        .collect();

    let snacks = picks
        .take(SNACK_COUNT)
        .map(|pick| build_meal(MealSlot::Snack, per_snack, pick, rng))
        .collect();

    MealPlan { meals, snacks }
}

/// Generate a meal plan using the thread-local RNG
pub fn generate_meal_plan_random(day_kcal: u32, goal: Goal) -> MealPlan {
    generate_meal_plan(day_kcal, goal, &mut rand::thread_rng())
}

struct PantryPick {
    protein: &'static str,
    carb: &'static str,
    fat: &'static str,
}

fn build_meal<R: Rng + ?Sized>(slot: MealSlot, kcal: u32, pick: PantryPick, rng: &mut R) -> Meal {
    let vegetables: Vec<&str> = VEGETABLES.choose_multiple(rng, 2).copied().collect();
    let prep_minutes = rng.gen_range(PREP_MINUTES_MIN..PREP_MINUTES_MAX);

    let title = match slot {
        MealSlot::Snack => format!("{} & {} bites", pick.protein, pick.fat.to_lowercase()),
        _ => format!(
            "{}: {} with {}",
            slot.label(),
            pick.protein,
            pick.carb.to_lowercase()
        ),
    };

    let mut ingredients = vec![
        pick.protein.to_string(),
        pick.carb.to_string(),
        pick.fat.to_string(),
    ];
    ingredients.extend(vegetables.iter().map(|v| v.to_string()));

    let steps = vec![
        format!("Wash and chop the {} and {}.", vegetables[0].to_lowercase(), vegetables[1].to_lowercase()),
        format!("Cook the {} until done.", pick.protein.to_lowercase()),
        format!("Prepare the {}.", pick.carb.to_lowercase()),
        format!("Plate everything and finish with {}.", pick.fat.to_lowercase()),
    ];

    Meal {
        id: Uuid::new_v4().to_string(),
        title,
        kcal,
        macros: slot.macros(),
        prep_minutes,
        ingredients,
        steps,
        tags: BTreeSet::from(["halal".to_string()]),
    }
}
