// src/routes/mod.rs
//! Routes gateway for the Airwatch backend (EMBP).
//!
//! Each sibling module exports a subrouter; this gateway merges them and
//! attaches the shared [`AppState`], so `main.rs` only calls [`router`].

use anyhow::Result;
use axum::Router;

use crate::{snapshot::StationSnapshot, waqi::WaqiClient, Config};

mod health;
mod history;
mod levels;
mod region;
mod stations;

// ---

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    // ---
    pub config: Config,
    pub waqi: WaqiClient,
    pub snapshot: StationSnapshot,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        // ---
        let waqi = WaqiClient::new(&config)?;
        Ok(AppState {
            config,
            waqi,
            snapshot: StationSnapshot::default(),
        })
    }
}

pub fn router(config: Config) -> Result<Router> {
    // ---
    let state = AppState::new(config)?;

    Ok(Router::new()
        .merge(stations::router())
        .merge(history::router())
        .merge(levels::router())
        .merge(region::router())
        .merge(health::router())
        .with_state(state))
}
