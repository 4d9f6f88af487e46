//! Synthetic daily AQI averages over a date range.
//!
//! Each past day gets a seasonal base plus noise drawn from an RNG seeded by
//! the station id and the date, so a given (station, day) always yields the
//! same value. Today uses the live reading when one is available.
//!
//! The seed comes from `FxHasher`, whose output depends on the target's
//! pointer width, and feeds `StdRng`, whose stream may change between `rand`
//! releases. Values are therefore stable for a given build and platform, not
//! across them.

use std::hash::{Hash, Hasher};

use chrono::{Datelike, Days, Local, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rustc_hash::FxHasher;
use serde::Serialize;

const VALUE_MIN: i64 = 20;
const VALUE_MAX: i64 = 900;
const NOISE_AMPLITUDE: f64 = 50.0;

/// One daily sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    // ---
    pub date: NaiveDate,
    /// Chart label `day/month`, e.g. `"7/3"`.
    pub display_date: String,
    pub value: i64,
}

/// Generate one point per day from `start` to `end` inclusive, treating the
/// local date as today.
pub fn generate(
    station_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    live: Option<i64>,
) -> Vec<DailyPoint> {
    // ---
    generate_as_of(station_id, start, end, live, Local::now().date_naive())
}

/// Generate one point per day from `start` to `end` inclusive.
///
/// Returns an empty series when `start` is after `end`.
pub fn generate_as_of(
    station_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    live: Option<i64>,
    today: NaiveDate,
) -> Vec<DailyPoint> {
    // ---
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| {
            let value = match live {
                Some(live) if date == today => live,
                _ => synthetic_value(station_id, date),
            };
            DailyPoint {
                date,
                display_date: format!("{}/{}", date.day(), date.month()),
                value,
            }
        })
        .collect()
}

/// The `(start, end)` range covering the `days` days before `today` and
/// today itself.
pub fn default_window(today: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    // ---
    let start = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// Seasonal base plus seeded noise, clamped to [20, 900].
fn synthetic_value(station_id: &str, date: NaiveDate) -> i64 {
    // ---
    let mut rng = StdRng::seed_from_u64(day_seed(station_id, date));
    let noise = rng.random_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE);

    let value = (seasonal_base(date) + noise).floor() as i64;
    value.clamp(VALUE_MIN, VALUE_MAX)
}

/// Winter (Nov-Feb) runs high, monsoon (Jun-Sep) runs low.
fn seasonal_base(date: NaiveDate) -> f64 {
    match date.month0() {
        10 | 11 | 0 | 1 => 250.0,
        5..=8 => 80.0,
        _ => 100.0,
    }
}

fn day_seed(station_id: &str, date: NaiveDate) -> u64 {
    // ---
    let mut hasher = FxHasher::default();
    station_id.hash(&mut hasher);
    date.format("%Y-%m-%d").to_string().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 3, 15)
    }

    #[test]
    fn test_single_day_is_deterministic() {
        // ---
        let day = date(2024, 1, 1);
        let first = generate_as_of("station-1", day, day, None, today());
        let second = generate_as_of("station-1", day, day, None, today());

        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
        assert_eq!(first[0].date, day);
        assert_eq!(first[0].display_date, "1/1");
    }

    #[test]
    fn test_start_after_end_is_empty() {
        // ---
        let points = generate_as_of("7024", date(2024, 6, 10), date(2024, 6, 1), None, today());
        assert!(points.is_empty());
    }

    #[test]
    fn test_live_value_overrides_today() {
        // ---
        let points = generate_as_of("7024", today(), today(), Some(175), today());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 175);

        // Live values are passed through without clamping
        let points = generate_as_of("7024", today(), today(), Some(5), today());
        assert_eq!(points[0].value, 5);
    }

    #[test]
    fn test_live_value_ignored_for_other_days() {
        // ---
        let start = date(2024, 3, 10);
        let with_live = generate_as_of("7024", start, today(), Some(175), today());
        let without = generate_as_of("7024", start, today(), None, today());

        assert_eq!(with_live.len(), 6);
        assert_eq!(with_live[..5], without[..5]);
        assert_eq!(with_live[5].value, 175);
        assert_eq!(without[5].value, synthetic_value("7024", today()));
    }

    #[test]
    fn test_range_is_inclusive_and_ascending() {
        // ---
        let points = generate_as_of("7024", date(2024, 2, 27), date(2024, 3, 2), None, today());
        let labels: Vec<&str> = points.iter().map(|p| p.display_date.as_str()).collect();

        assert_eq!(labels, vec!["27/2", "28/2", "29/2", "1/3", "2/3"]);
        for pair in points.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_seasonal_ranges() {
        // ---
        // Winter: 250 +/- 50, monsoon: 80 +/- 50 floored at 20, otherwise 100 +/- 50
        for p in generate_as_of("7024", date(2023, 12, 1), date(2024, 2, 29), None, today()) {
            assert!((200..300).contains(&p.value), "winter {} on {}", p.value, p.date);
        }
        for p in generate_as_of("7024", date(2024, 6, 1), date(2024, 9, 30), None, today()) {
            assert!((20..130).contains(&p.value), "monsoon {} on {}", p.value, p.date);
        }
        for p in generate_as_of("7024", date(2024, 3, 1), date(2024, 5, 31), None, today()) {
            assert!((50..150).contains(&p.value), "spring {} on {}", p.value, p.date);
        }
    }

    #[test]
    fn test_station_changes_noise() {
        // ---
        let start = date(2024, 1, 1);
        let end = date(2024, 1, 31);
        let a = generate_as_of("station-a", start, end, None, today());
        let b = generate_as_of("station-b", start, end, None, today());
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_uses_local_today() {
        // ---
        let today = Local::now().date_naive();
        let points = generate("station-1", today, today, Some(175));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, today);
        assert_eq!(points[0].value, 175);

        let day = date(2024, 1, 1);
        assert_eq!(
            generate("station-1", day, day, Some(175)),
            generate_as_of("station-1", day, day, None, today)
        );
    }

    #[test]
    fn test_default_window() {
        // ---
        let (start, end) = default_window(today(), 7);
        assert_eq!(start, date(2024, 3, 8));
        assert_eq!(end, today());
        assert_eq!(generate_as_of("7024", start, end, None, today()).len(), 8);
    }

    #[test]
    fn test_seasonal_base() {
        // ---
        assert_eq!(seasonal_base(date(2024, 11, 1)), 250.0);
        assert_eq!(seasonal_base(date(2024, 2, 1)), 250.0);
        assert_eq!(seasonal_base(date(2024, 3, 1)), 100.0);
        assert_eq!(seasonal_base(date(2024, 6, 1)), 80.0);
        assert_eq!(seasonal_base(date(2024, 9, 30)), 80.0);
        assert_eq!(seasonal_base(date(2024, 10, 1)), 100.0);
    }
}
