//! AIQO WASM Module
//!
//! Browser bindings for the pure calculators and scoring. Structured values
//! cross the boundary as JSON strings using the persisted camelCase shapes.

use aiqo_shared::{
    basal_metabolic_rate, daily_energy_target, hydration_target as water_target, select_nudge,
    wellness_score, BiologicalSex, Dashboard, Day, Nudge, Profile,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct NudgeView {
    nudge: Nudge,
    message: &'static str,
}

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid {} JSON: {}", what, e))
}

fn to_js(err: String) -> JsValue {
    JsValue::from_str(&err)
}

/// Mifflin-St Jeor basal metabolic rate in kcal/day
#[wasm_bindgen]
pub fn bmr(is_male: bool, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
    let sex = if is_male {
        BiologicalSex::Male
    } else {
        BiologicalSex::Female
    };
    basal_metabolic_rate(sex, weight_kg, height_cm, age_years)
}

fn energy_target_inner(profile_json: &str) -> Result<i32, String> {
    let profile: Profile = parse(profile_json, "profile")?;
    Ok(daily_energy_target(&profile))
}

/// Daily calorie target for a profile
#[wasm_bindgen]
pub fn energy_target(profile_json: &str) -> Result<i32, JsValue> {
    energy_target_inner(profile_json).map_err(to_js)
}

fn hydration_target_inner(profile_json: &str) -> Result<i32, String> {
    let profile: Profile = parse(profile_json, "profile")?;
    Ok(water_target(&profile))
}

/// Daily water target in ml for a profile
#[wasm_bindgen]
pub fn hydration_target(profile_json: &str) -> Result<i32, JsValue> {
    hydration_target_inner(profile_json).map_err(to_js)
}

fn wellness_score_inner(day_json: &str) -> Result<u8, String> {
    let day: Day = parse(day_json, "day")?;
    Ok(wellness_score(&day))
}

#[wasm_bindgen]
pub fn wellness_score_json(day_json: &str) -> Result<u8, JsValue> {
    wellness_score_inner(day_json).map_err(to_js)
}

fn nudge_inner(day_json: &str) -> Result<String, String> {
    let day: Day = parse(day_json, "day")?;
    let nudge = select_nudge(&day);
    let view = NudgeView {
        nudge,
        message: nudge.message(),
    };
    serde_json::to_string(&view).map_err(|e| e.to_string())
}

/// `{"nudge": <token>, "message": <text>}` for a day
#[wasm_bindgen]
pub fn nudge_json(day_json: &str) -> Result<String, JsValue> {
    nudge_inner(day_json).map_err(to_js)
}

fn dashboard_inner(day_json: &str, streak: u32) -> Result<String, String> {
    let day: Day = parse(day_json, "day")?;
    serde_json::to_string(&Dashboard::from_day(&day, streak)).map_err(|e| e.to_string())
}

/// Full dashboard view for a day
#[wasm_bindgen]
pub fn dashboard_json(day_json: &str, streak: u32) -> Result<String, JsValue> {
    dashboard_inner(day_json, streak).map_err(to_js)
}

#[wasm_bindgen]
pub fn format_duration(minutes: u32) -> String {
    aiqo_shared::format_duration(minutes)
}
