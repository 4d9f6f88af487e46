//! Synthetic 25-point hourly AQI series.
//!
//! The series walks backward one hour at a time from an anchor, starting at
//! a baseline value and drifting by a bounded random step plus a rush-hour
//! bump. Points are returned oldest first.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Timelike};
use rand::Rng;
use serde::Serialize;

use super::label_char_sum;

/// Baseline used when the caller has no finite reading.
pub const DEFAULT_BASELINE: f64 = 100.0;

/// Number of points in every series (anchor hour plus 24 before it).
pub const SERIES_LEN: usize = 25;

const CURSOR_MIN: f64 = 10.0;
const CURSOR_MAX: f64 = 999.0;
const PAST_DATE_FLOOR: f64 = 20.0;
const RUSH_HOUR_BUMP: i64 = 15;

/// One hourly sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    // ---
    pub timestamp: DateTime<FixedOffset>,
    /// Local hour of day, 0-23.
    pub hour: u32,
    /// Chart label such as `"18:00"`.
    pub label: String,
    pub value: i64,
    pub pm25: i64,
    pub no2: i64,
}

impl HourlyPoint {
    fn new(timestamp: DateTime<FixedOffset>, value: i64) -> Self {
        // ---
        let hour = timestamp.hour();
        HourlyPoint {
            timestamp,
            hour,
            label: format!("{}:00", hour),
            value,
            pm25: scaled_floor(value, 9),
            no2: scaled_floor(value, 3),
        }
    }
}

/// `floor(value * tenths / 10)`, exact for any `i64` and overflow-free.
fn scaled_floor(value: i64, tenths: i64) -> i64 {
    // |value * tenths / 10| <= |value| for tenths < 10, so the result fits
    (i128::from(value) * i128::from(tenths)).div_euclid(10) as i64
}

/// Generate a series against the local clock using the thread RNG.
///
/// `anchor` of `None` or today's date anchors the series at the current
/// moment; any other date anchors it at 23:00 local time on that date.
pub fn generate(baseline: Option<f64>, anchor: Option<NaiveDate>) -> Vec<HourlyPoint> {
    // ---
    generate_at(baseline, anchor, &Local::now(), &mut rand::rng())
}

/// Generate a series relative to `now` in its time zone.
pub fn generate_at<Tz, R>(
    baseline: Option<f64>,
    anchor: Option<NaiveDate>,
    now: &DateTime<Tz>,
    rng: &mut R,
) -> Vec<HourlyPoint>
where
    Tz: TimeZone,
    R: Rng,
{
    // ---
    let baseline = baseline
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_BASELINE);

    let past_date = anchor.filter(|date| *date != now.date_naive());

    let (end_time, mut cursor) = match past_date {
        None => (now.fixed_offset(), baseline),
        Some(date) => (end_of_day(date, &now.timezone()), shifted_baseline(baseline, date)),
    };

    let mut points = Vec::with_capacity(SERIES_LEN);
    for i in 0..SERIES_LEN as i64 {
        let time = end_time - chrono::Duration::hours(i);
        let bump = if is_rush_hour(time.hour()) {
            RUSH_HOUR_BUMP
        } else {
            0
        };
        let step: i64 = rng.random_range(-10..10);

        // Saturates for baselines beyond the i64 range
        points.push(HourlyPoint::new(time, cursor.floor() as i64));

        cursor = (cursor - (step + bump) as f64).clamp(CURSOR_MIN, CURSOR_MAX);
    }

    points.reverse();
    points
}

/// Morning (08-10) and evening (18-21) traffic peaks.
fn is_rush_hour(hour: u32) -> bool {
    matches!(hour, 8..=10 | 18..=21)
}

/// Perturb the baseline for a past date by a shift in [-50, 49] derived
/// from the date label.
fn shifted_baseline(baseline: f64, date: NaiveDate) -> f64 {
    // ---
    let label = date.format("%Y-%m-%d").to_string();
    let shift = f64::from(label_char_sum(&label) % 100) - 50.0;
    (baseline + shift).max(PAST_DATE_FLOOR)
}

/// 23:00 on `date` in `tz`.
fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<FixedOffset> {
    // ---
    let naive = date.and_time(chrono::NaiveTime::MIN) + chrono::Duration::hours(23);
    match tz.from_local_datetime(&naive).earliest() {
        Some(time) => time.fixed_offset(),
        // 23:00 skipped by a DST transition; read the wall time as UTC
        None => tz.from_utc_datetime(&naive).fixed_offset(),
    }
}
