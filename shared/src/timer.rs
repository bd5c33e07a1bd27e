//! Countdown state machine for rest and cook timers
//!
//! The machine is advanced by an external once-per-second tick. Cancelling is a
//! plain transition back to [`Countdown::Idle`].

use serde::{Deserialize, Serialize};

/// Which screen a timer belongs to. Timers of different kinds never cancel each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    /// Rest between workout sets
    Rest,
    /// Recipe cooking countdown
    Cook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Countdown {
    #[default]
    Idle,
    Running {
        remaining_secs: u32,
    },
    Expired,
}

impl Countdown {
    /// Start (or restart) a countdown. A zero length expires immediately.
    pub fn start(seconds: u32) -> Self {
        if seconds == 0 {
            Countdown::Expired
        } else {
            Countdown::Running { remaining_secs: seconds }
        }
    }

    /// Advance by one second
    pub fn tick(self) -> Self {
        match self {
            Countdown::Running { remaining_secs } if remaining_secs <= 1 => Countdown::Expired,
            Countdown::Running { remaining_secs } => Countdown::Running {
                remaining_secs: remaining_secs - 1,
            },
            other => other,
        }
    }

    pub fn cancel(self) -> Self {
        Countdown::Idle
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Countdown::Running { .. })
    }

    pub fn remaining_secs(&self) -> u32 {
        match self {
            Countdown::Running { remaining_secs } => *remaining_secs,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_runs_to_expiry() {
        let mut state = Countdown::start(3);
        assert_eq!(state.remaining_secs(), 3);
        state = state.tick();
        state = state.tick();
        assert_eq!(state, Countdown::Running { remaining_secs: 1 });
        state = state.tick();
        assert_eq!(state, Countdown::Expired);
        assert_eq!(state.tick(), Countdown::Expired);
    }

    #[test]
    fn test_zero_length_expires_immediately() {
        assert_eq!(Countdown::start(0), Countdown::Expired);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        assert_eq!(Countdown::start(60).cancel(), Countdown::Idle);
        assert_eq!(Countdown::Idle.tick(), Countdown::Idle);
    }

    #[test]
    fn test_countdown_json() {
        let json = serde_json::to_string(&Countdown::start(5)).unwrap();
        assert_eq!(json, r#"{"state":"running","remaining_secs":5}"#);
    }
}
