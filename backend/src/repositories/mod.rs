//! Typed repositories over the persisted key layout
//!
//! Each repository reads and writes one family of keys through a
//! [`KeyValueStore`](crate::storage::KeyValueStore). Malformed records are
//! reported as absent so callers can fall back to fresh values.

pub mod day;
pub mod journal;
pub mod profile;
pub mod streak;

pub use day::DayRepository;
pub use journal::JournalRepository;
pub use profile::ProfileRepository;
pub use streak::StreakRepository;
