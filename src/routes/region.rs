// src/routes/region.rs
//! `GET /region`: the monitored bounding box and the map's initial center.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::routes::AppState;

/// JSON response body for the `/region` endpoint.
#[derive(Debug, Serialize)]
struct RegionResponse {
    /// `[latMin, lngMin, latMax, lngMax]`
    bounds: [f64; 4],
    /// `[lat, lng]`
    center: [f64; 2],
}

pub fn router() -> Router<AppState> {
    Router::new().route("/region", get(handler))
}

async fn handler(State(state): State<AppState>) -> Json<RegionResponse> {
    // ---
    let b = state.config.bounds;
    let (lat, lng) = b.center();
    Json(RegionResponse {
        bounds: [b.lat_min, b.lng_min, b.lat_max, b.lng_max],
        center: [lat, lng],
    })
}
