//! `GET /levels`: the AQI severity bands, for legends and marker colors.

use axum::{routing::get, Json, Router};

use crate::levels::{SeverityBand, BANDS};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/levels", get(handler))
}

async fn handler() -> Json<&'static [SeverityBand]> {
    Json(&BANDS[..])
}
