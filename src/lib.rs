//! `codemetal-airwatch`: backend for a regional air quality dashboard.
//!
//! The service lists WAQI monitoring stations inside a configured region,
//! classifies their AQI into severity bands, and serves synthetic hourly and
//! daily history for the dashboard charts.
//!
//! Module layout follows the Explicit Module Boundary Pattern (EMBP):
//! - `config`: environment-driven configuration
//! - `levels`: AQI severity bands
//! - `history`: hourly and daily series generators
//! - `models`: upstream payloads and the served `Station`
//! - `waqi`: upstream client
//! - `snapshot`: last known station list
//! - `stats`: KPI summaries
//! - `routes`: HTTP gateway

pub mod config;
pub mod history;
pub mod levels;
pub mod models;
pub mod routes;
pub mod snapshot;
pub mod stats;
pub mod waqi;

pub use config::Config;
pub use levels::{classify, Level, SeverityBand};
pub use models::Station;
