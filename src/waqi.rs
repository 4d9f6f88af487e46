//! Client for the World Air Quality Index (WAQI) API.
//!
//! Two endpoints are used:
//! - `/map/bounds/?latlng=..` lists the stations inside the configured box
//! - `/feed/@{id}/` returns the detail for one station
//!
//! Both wrap their payload in `{ "status": "ok" | "error", "data": .. }`.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::de::DeserializeOwned;

use crate::{
    config::{BoundingBox, Config},
    models::{ApiEnvelope, RawFeed, RawMapStation, Station},
};

// ---

/// WAQI client configured with a token, base URL and region.
#[derive(Debug, Clone)]
pub struct WaqiClient {
    // ---
    http: reqwest::Client,
    base_url: String,
    token: String,
    bounds: BoundingBox,
}

impl WaqiClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        // ---
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.http_timeout_secs)))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(WaqiClient {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            bounds: config.bounds,
        })
    }

    /// Fetch all displayable stations inside the configured bounding box.
    ///
    /// Entries that fail to parse or fail [`RawMapStation::to_station`] are
    /// skipped and logged at debug level.
    pub async fn fetch_stations(&self) -> Result<Vec<Station>> {
        // ---
        let url = format!("{}/map/bounds/", self.base_url);
        let latlng = self.bounds.to_string();

        tracing::debug!("Fetching station list from {} for {}", url, latlng);
        let data: Vec<serde_json::Value> = self
            .get(&url, &[("latlng", latlng.as_str())])
            .await
            .context("station list request failed")?;

        let total = data.len();
        let stations: Vec<Station> = data
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| match serde_json::from_value::<RawMapStation>(item) {
                Ok(raw) => raw.to_station(),
                Err(e) => {
                    tracing::debug!("Failed to parse station item {}: {}", i, e);
                    None
                }
            })
            .collect();

        tracing::info!(
            "Fetched {} stations ({} dropped)",
            stations.len(),
            total - stations.len()
        );
        Ok(stations)
    }

    /// Fetch the detail payload for one station.
    pub async fn fetch_feed(&self, station_id: i64) -> Result<RawFeed> {
        // ---
        let url = format!("{}/feed/@{}/", self.base_url, station_id);

        tracing::debug!("Fetching station detail from {}", url);
        self.get(&url, &[])
            .await
            .with_context(|| format!("detail request for station {} failed", station_id))
    }

    /// GET `url` with the token attached and unwrap the WAQI envelope.
    async fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        // ---
        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("token", self.token.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let envelope: ApiEnvelope = response.json().await?;
        if envelope.status != "ok" {
            let message = match &envelope.data {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            bail!("upstream returned status '{}': {}", envelope.status, message);
        }

        serde_json::from_value(envelope.data).map_err(|e| anyhow!("Unexpected payload: {}", e))
    }
}
