// src/routes/history.rs
//! Synthetic history endpoints backing the dashboard charts.
//!
//! - `GET /stations/{id}/hourly`: 25 hourly points ending now or at 23:00 of `?date=`
//! - `GET /stations/{id}/daily`: one point per day over `?start=`/`?end=`
//!
//! Both seed from the station's last known AQI in the shared snapshot.

use axum::{
    extract::Path, extract::Query, extract::State, http::StatusCode, response::IntoResponse,
    routing::get, Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    history::{daily, hourly, DailyPoint, HourlyPoint},
    routes::AppState,
    stats::SeriesSummary,
};

/// Longest daily range served in one request.
const MAX_DAILY_SPAN_DAYS: i64 = 3660;

/// Finite baselines at or beyond this magnitude do not fit an `i64` reading.
/// Non-finite ones fall back to the generator default instead.
const MAX_BASELINE_MAGNITUDE: f64 = i64::MAX as f64;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/stations/{id}/hourly", get(hourly_handler))
        .route("/stations/{id}/daily", get(daily_handler))
}

/// Query parameters for the hourly series
#[derive(Debug, Deserialize)]
pub struct HourlyQuery {
    /// Day to show; absent or today means "the last 24 hours".
    date: Option<NaiveDate>,
    /// Overrides the station's last known AQI as the starting value.
    baseline: Option<f64>,
}

/// Query parameters for the daily series
#[derive(Debug, Deserialize)]
pub struct DailyQuery {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct Series<P> {
    station_id: i64,
    summary: Option<SeriesSummary>,
    points: Vec<P>,
}

impl<P> Series<P> {
    fn new(station_id: i64, points: Vec<P>, value: impl Fn(&P) -> i64) -> Self {
        // ---
        let values: Vec<i64> = points.iter().map(value).collect();
        Series {
            station_id,
            summary: SeriesSummary::from_values(&values),
            points,
        }
    }
}

async fn hourly_handler(
    Path(id): Path<i64>,
    Query(params): Query<HourlyQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // ---
    info!("GET /stations/{}/hourly - {:?}", id, params);

    if let Some(b) = params.baseline.filter(|b| b.is_finite() && b.abs() >= MAX_BASELINE_MAGNITUDE) {
        return (StatusCode::BAD_REQUEST, Json(format!("Baseline {} is out of range", b)))
            .into_response();
    }

    let baseline = params
        .baseline
        .or_else(|| state.snapshot.live_aqi(id).map(|aqi| aqi as f64));
    debug!("Hourly baseline for station {}: {:?}", id, baseline);

    let points: Vec<HourlyPoint> = hourly::generate(baseline, params.date);
    (StatusCode::OK, Json(Series::new(id, points, |p| p.value))).into_response()
}

async fn daily_handler(
    Path(id): Path<i64>,
    Query(params): Query<DailyQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // ---
    info!("GET /stations/{}/daily - {:?}", id, params);

    let today = Local::now().date_naive();
    let (default_start, default_end) = daily::default_window(today, state.config.daily_window_days);
    let start = params.start.unwrap_or(default_start);
    let end = params.end.unwrap_or(default_end);

    if (end - start).num_days() > MAX_DAILY_SPAN_DAYS {
        return (
            StatusCode::BAD_REQUEST,
            Json("Date range is too long"),
        )
            .into_response();
    }

    let live = state.snapshot.live_aqi(id);
    let points: Vec<DailyPoint> = daily::generate(&id.to_string(), start, end, live);

    debug!("GET /stations/{}/daily - Returning {} points", id, points.len());
    (StatusCode::OK, Json(Series::new(id, points, |p| p.value))).into_response()
}
