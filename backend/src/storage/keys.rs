//! Persisted key layout
//!
//! These names are shared with the mobile client and must not change.

use chrono::NaiveDate;

pub const PROFILE_KEY: &str = "aiqo_onboarding_v2";
pub const STREAK_KEY: &str = "aiqo_streak_v2";

const DAY_PREFIX: &str = "aiqo_day_";
const JOURNAL_PREFIX: &str = "aiqo_journal_";

/// `aiqo_day_<YYYY-MM-DD>`
pub fn day_key(date: NaiveDate) -> String {
    format!("{}{}", DAY_PREFIX, date.format("%Y-%m-%d"))
}

/// `aiqo_journal_<YYYY-MM-DD>`
pub fn journal_key(date: NaiveDate) -> String {
    format!("{}{}", JOURNAL_PREFIX, date.format("%Y-%m-%d"))
}
