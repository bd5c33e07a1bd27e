//! History export
//!
//! Writes stored day records over an inclusive date range as CSV. Dates with
//! no stored record are skipped; nothing is created.

use aiqo_shared::{wellness_score, Day};
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::repositories::DayRepository;
use crate::storage::KeyValueStore;

/// Longest range accepted by a single export
pub const MAX_EXPORT_DAYS: i64 = 366;

const HEADER: [&str; 12] = [
    "date",
    "water_ml",
    "water_target",
    "steps",
    "steps_goal",
    "kcal_consumed",
    "kcal_target",
    "sleep_pct",
    "prayer_done",
    "workout_done",
    "wellness_score",
    "complete",
];

/// One exported day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCsvRow {
    pub date: String,
    pub water_ml: i32,
    pub water_target: i32,
    pub steps: u32,
    pub steps_goal: u32,
    pub kcal_consumed: i32,
    pub kcal_target: i32,
    pub sleep_pct: f64,
    pub prayer_done: bool,
    pub workout_done: bool,
    pub wellness_score: u8,
    pub complete: bool,
}

impl From<&Day> for DayCsvRow {
    fn from(day: &Day) -> Self {
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            water_ml: day.water_ml,
            water_target: day.water_target,
            steps: day.steps,
            steps_goal: day.steps_goal,
            kcal_consumed: day.kcal_consumed,
            kcal_target: day.kcal_target,
            sleep_pct: day.sleep_pct,
            prayer_done: day.prayer_done,
            workout_done: day.workout_done,
            wellness_score: wellness_score(day),
            complete: day.is_complete(),
        }
    }
}

/// Day history as CSV
pub struct ExportService;

impl ExportService {
    /// Stored days between `start` and `end` inclusive, oldest first
    pub async fn collect_days(
        store: &dyn KeyValueStore,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Day>> {
        Self::check_range(start, end)?;

        let mut days = Vec::new();
        for date in start.iter_days().take_while(|d| *d <= end) {
            if let Some(day) = DayRepository::get(store, date).await? {
                days.push(day);
            }
        }
        Ok(days)
    }

    /// Export stored days as CSV with a header row
    pub async fn days_csv(
        store: &dyn KeyValueStore,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<String> {
        let days = Self::collect_days(store, start, end).await?;
        tracing::debug!(%start, %end, rows = days.len(), "Exporting day history");

        let rows: Vec<DayCsvRow> = days.iter().map(DayCsvRow::from).collect();
        Self::to_csv(&rows)
    }

    fn check_range(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
        if start > end {
            return Err(AppError::Validation(format!(
                "Export range start {} is after end {}",
                start, end
            )));
        }
        let span = (end - start).num_days() + 1;
        if span > MAX_EXPORT_DAYS {
            return Err(AppError::Validation(format!(
                "Export range covers {} days; at most {} allowed",
                span, MAX_EXPORT_DAYS
            )));
        }
        Ok(())
    }

    /// Convert rows to a CSV string; the header is written even with no rows
    fn to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        wtr.write_record(HEADER)?;
        for record in data {
            wtr.serialize(record)?;
        }
        let bytes = wtr.into_inner().map_err(|e| AppError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use aiqo_shared::{DayPatch, Profile};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    async fn store_day(store: &MemoryStore, date: NaiveDate, patch: DayPatch) -> Day {
        let day = Day::create(&Profile::default(), date).apply(patch);
        DayRepository::put(store, &day).await.unwrap();
        day
    }

    #[tokio::test]
    async fn test_only_stored_days_exported() {
        let store = MemoryStore::new();
        store_day(&store, date(1), DayPatch::default()).await;
        store_day(&store, date(3), DayPatch::prayer(true)).await;

        let csv = ExportService::days_csv(&store, date(1), date(5)).await.unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER.join(","));
        assert!(lines[1].starts_with("2026-08-01,0,3350,0,10000,0,2183,"));
        assert!(lines[2].starts_with("2026-08-03,"));
        assert!(lines[2].contains(",true,false,"));

        // Export never creates records
        assert!(!DayRepository::exists(&store, date(2)).await.unwrap());
    }

    #[tokio::test]
    async fn test_complete_column() {
        let store = MemoryStore::new();
        let base = Day::create(&Profile::default(), date(9));
        let patch = DayPatch {
            water_ml: Some(base.water_target),
            steps: Some(base.steps_goal),
            ..DayPatch::default()
        };
        store_day(&store, date(9), patch).await;

        let csv = ExportService::days_csv(&store, date(9), date(9)).await.unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.ends_with(",true"));
    }

    #[tokio::test]
    async fn test_empty_range_has_header_only() {
        let store = MemoryStore::new();
        let csv = ExportService::days_csv(&store, date(1), date(1)).await.unwrap();
        assert_eq!(csv.trim_end(), HEADER.join(","));
    }

    #[tokio::test]
    async fn test_reversed_range_rejected() {
        let store = MemoryStore::new();
        let err = ExportService::days_csv(&store, date(5), date(1)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_range_limit() {
        let store = MemoryStore::new();
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let year_end = start + chrono::Duration::days(MAX_EXPORT_DAYS - 1);
        assert!(ExportService::days_csv(&store, start, year_end).await.is_ok());

        let too_far = year_end.succ_opt().unwrap();
        assert!(matches!(
            ExportService::days_csv(&store, start, too_far).await,
            Err(AppError::Validation(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_export_rows_match_stored_days_in_range(
            stored in prop::collection::btree_set(0i64..60, 0..12),
            start_offset in 0i64..60,
            span in 0i64..60,
        ) {
            let origin = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
            let start = origin + chrono::Duration::days(start_offset);
            let end = start + chrono::Duration::days(span);

            let csv = tokio_test::block_on(async {
                let store = MemoryStore::new();
                for offset in &stored {
                    store_day(&store, origin + chrono::Duration::days(*offset), DayPatch::default()).await;
                }
                ExportService::days_csv(&store, start, end).await.unwrap()
            });

            let expected: BTreeSet<NaiveDate> = stored
                .iter()
                .map(|offset| origin + chrono::Duration::days(*offset))
                .filter(|d| *d >= start && *d <= end)
                .collect();
            let exported: Vec<&str> = csv.lines().skip(1).map(|row| &row[..10]).collect();

            prop_assert!(exported.len() as i64 <= span + 1);
            prop_assert_eq!(exported.len(), expected.len());
            let expected: Vec<String> = expected.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
            prop_assert_eq!(exported, expected.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
