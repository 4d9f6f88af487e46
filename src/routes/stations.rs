// src/routes/stations.rs
//! Station list and station detail endpoints.
//!
//! - `GET /stations`: stations in the configured region, most polluted first
//! - `GET /stations/{id}`: one station merged with its upstream detail
//!
//! Upstream failures never surface as errors when a last known answer exists.

use axum::{
    extract::Path, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::{
    models::Station,
    routes::AppState,
    stats::NetworkSummary,
};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/stations", get(list_handler))
        .route("/stations/{id}", get(detail_handler))
}

/// Response body for `GET /stations`.
#[derive(Debug, Serialize)]
struct StationList {
    summary: NetworkSummary,
    stations: Vec<Station>,
}

/// List stations in the configured region, most polluted first.
///
/// An upstream failure is logged and served as an empty list.
async fn list_handler(State(state): State<AppState>) -> impl IntoResponse {
    // ---
    info!("GET /stations - Fetching station list");

    let mut stations = match state.waqi.fetch_stations().await {
        Ok(stations) => {
            state.snapshot.replace(stations.clone());
            stations
        }
        Err(e) => {
            error!("Failed to fetch station list: {:#}", e);
            Vec::new()
        }
    };

    stations.sort_by(|a, b| b.aqi.cmp(&a.aqi));
    let summary = NetworkSummary::from_stations(&stations);

    info!("GET /stations - Returning {} stations", stations.len());
    (StatusCode::OK, Json(StationList { summary, stations }))
}

/// Fetch one station's detail and merge it into the last known entry.
///
/// If the upstream fails the last known entry is returned unchanged.
async fn detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    // ---
    info!("GET /stations/{} - Fetching detail", id);
    let known = state.snapshot.get(id);

    let feed = match state.waqi.fetch_feed(id).await {
        Ok(feed) => feed,
        Err(e) => {
            error!("Detail fetch failed for station {}: {:#}", id, e);
            return match known {
                Some(station) => {
                    debug!("GET /stations/{} - Serving last known entry", id);
                    (StatusCode::OK, Json(station)).into_response()
                }
                None => (
                    StatusCode::BAD_GATEWAY,
                    Json("Failed to fetch station detail"),
                )
                    .into_response(),
            };
        }
    };

    let merged = match known {
        Some(mut station) => {
            station.apply_feed(&feed);
            Some(station)
        }
        None => Station::from_feed(id, &feed),
    };

    match merged {
        Some(station) => {
            state.snapshot.upsert(station.clone());
            (StatusCode::OK, Json(station)).into_response()
        }
        None => {
            warn!("Station {} detail has no usable coordinates", id);
            (StatusCode::NOT_FOUND, Json("Station not found")).into_response()
        }
    }
}
