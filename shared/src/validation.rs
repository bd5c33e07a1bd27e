//! Input validation functions
//!
//! Field validators return `Result<(), String>`; the profile and journal
//! validators wrap failures in a [`ValidationError`] carrying the field name.

use crate::models::{JournalEntry, Profile, MOOD_MAX, MOOD_MIN};

/// Longest accepted journal note, in characters
pub const MAX_NOTE_CHARS: usize = 2000;
/// Largest single water entry in ml
pub const MAX_WATER_ENTRY_ML: i32 = 10_000;
/// Largest single step entry
pub const MAX_STEP_ENTRY: u32 = 100_000;

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in years (1-150)
pub fn validate_age(age: u32) -> Result<(), String> {
    match age {
        0 => Err("Age must be at least 1 year".to_string()),
        a if a > 150 => Err("Age cannot exceed 150 years".to_string()),
        _ => Ok(()),
    }
}

/// Validate percentage value (0-100)
pub fn validate_percentage(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Percentage must be a valid number".to_string());
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Validate hours spent sitting in a day
pub fn validate_sitting_hours(hours: f64) -> Result<(), String> {
    if hours.is_nan() || hours.is_infinite() {
        return Err("Hours must be a valid number".to_string());
    }
    if !(0.0..=24.0).contains(&hours) {
        return Err("Hours must be between 0 and 24".to_string());
    }
    Ok(())
}

/// Validate a single water entry
pub fn validate_water_entry(ml: i32) -> Result<(), String> {
    if ml <= 0 {
        return Err("Amount must be greater than 0".to_string());
    }
    if ml > MAX_WATER_ENTRY_ML {
        return Err(format!("Amount cannot exceed {}ml", MAX_WATER_ENTRY_ML));
    }
    Ok(())
}

/// Validate a single step entry
pub fn validate_step_entry(steps: u32) -> Result<(), String> {
    if steps > MAX_STEP_ENTRY {
        return Err(format!("Steps cannot exceed {} per entry", MAX_STEP_ENTRY));
    }
    Ok(())
}

/// Validate a local time-of-day string (`HH:MM`, 24h)
pub fn validate_time_of_day(value: &str) -> Result<(), String> {
    let time_regex = regex_lite::Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$")
        .map_err(|e| format!("Invalid time pattern: {}", e))?;
    if !time_regex.is_match(value) {
        return Err(format!("'{}' is not a valid HH:MM time", value));
    }
    Ok(())
}

/// Validate a journal mood (1-5)
pub fn validate_mood(mood: u8) -> Result<(), String> {
    if !(MOOD_MIN..=MOOD_MAX).contains(&mood) {
        return Err(format!("Mood must be between {} and {}", MOOD_MIN, MOOD_MAX));
    }
    Ok(())
}

fn field(name: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|message| ValidationError::new(name, &message))
}

/// Validate a complete onboarding profile
pub fn validate_profile(profile: &Profile) -> Result<(), ValidationError> {
    field("weight", validate_weight(profile.weight))?;
    field("height", validate_height_cm(profile.height))?;
    field("age", validate_age(profile.age))?;
    field("breakfast", validate_time_of_day(&profile.meal_times.breakfast))?;
    field("lunch", validate_time_of_day(&profile.meal_times.lunch))?;
    field("dinner", validate_time_of_day(&profile.meal_times.dinner))?;
    field("bedtime", validate_time_of_day(&profile.sleep_window.bedtime))?;
    field("wake", validate_time_of_day(&profile.sleep_window.wake))?;
    Ok(())
}

/// Validate a journal entry
pub fn validate_journal_entry(entry: &JournalEntry) -> Result<(), ValidationError> {
    field("mood", validate_mood(entry.mood))?;
    if entry.note.chars().count() > MAX_NOTE_CHARS {
        return Err(ValidationError::new(
            "note",
            &format!("Note cannot exceed {} characters", MAX_NOTE_CHARS),
        ));
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" => "Current Weight",
        "height" => "Height",
        "age" => "Age",
        "breakfast" => "Breakfast Time",
        "lunch" => "Lunch Time",
        "dinner" => "Dinner Time",
        "bedtime" => "Bedtime",
        "wake" => "Wake-up Time",
        "water_ml" => "Water",
        "steps" => "Steps",
        "sleep_pct" => "Sleep Quality",
        "sitting_hrs" => "Sitting Hours",
        "mood" => "Mood",
        "note" => "Journal Note",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}
