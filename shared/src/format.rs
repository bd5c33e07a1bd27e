//! Display formatting helpers

/// Format a duration given in minutes
///
/// `45` -> `"45 min"`, `125` -> `"2 hr 5 min"`
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        format!("{} min", minutes)
    } else {
        format!("{} hr {} min", minutes / 60, minutes % 60)
    }
}

/// Format a countdown in seconds as `MM:SS`
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
