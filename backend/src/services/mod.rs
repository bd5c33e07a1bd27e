//! Business logic services
//!
//! Services coordinate the pure domain in `aiqo-shared` with the
//! repositories. They hold no state of their own; [`DailySession`] owns the
//! in-memory view of the current day.

pub mod day;
pub mod export;
pub mod journal;
pub mod session;

pub use day::DayService;
pub use export::{DayCsvRow, ExportService, MAX_EXPORT_DAYS};
pub use journal::JournalService;
pub use session::DailySession;
