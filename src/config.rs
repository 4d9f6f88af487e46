//! Configuration loader for the `codemetal-airwatch` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). The upstream token and the monitored region are
//! carried in [`Config`] and handed to the WAQI client at construction time
//! rather than living in process-wide constants.
use std::{env, fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

/// Default upstream API base URL.
pub const DEFAULT_API_URL: &str = "https://api.waqi.info";

/// Default monitored region: Delhi NCR as `latMin,lngMin,latMax,lngMax`.
pub const DEFAULT_BOUNDS: &str = "28.4046,76.8425,28.8835,77.3477";

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Geographic rectangle that selects which stations are listed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    // ---
    pub lat_min: f64,
    pub lng_min: f64,
    pub lat_max: f64,
    pub lng_max: f64,
}

impl BoundingBox {
    /// Center point of the box as `(lat, lng)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.lat_min + self.lat_max) / 2.0,
            (self.lng_min + self.lng_max) / 2.0,
        )
    }
}

impl FromStr for BoundingBox {
    type Err = anyhow::Error;

    /// Parse `"latMin,lngMin,latMax,lngMax"`.
    fn from_str(s: &str) -> Result<Self> {
        // ---
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow!("Invalid bounding box '{}': {}", s, e))?;

        let [lat_min, lng_min, lat_max, lng_max] = parts[..] else {
            bail!("Bounding box '{}' must have exactly four values", s);
        };

        if parts.iter().any(|v| !v.is_finite()) {
            bail!("Bounding box '{}' contains non-finite values", s);
        }
        if lat_min > lat_max || lng_min > lng_max {
            bail!("Bounding box '{}' has min greater than max", s);
        }

        Ok(BoundingBox {
            lat_min,
            lng_min,
            lat_max,
            lng_max,
        })
    }
}

/// Format in the `latlng` query form the upstream API expects.
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.lat_min, self.lng_min, self.lat_max, self.lng_max
        )
    }
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// WAQI API token.
    pub api_token: String,

    /// WAQI API base URL.
    pub api_url: String,

    /// Region whose stations are listed.
    pub bounds: BoundingBox,

    /// Port the HTTP server listens on.
    pub http_port: u32,

    /// Upstream request timeout in seconds.
    pub http_timeout_secs: u32,

    /// Default length of the daily history window, in days before today.
    pub daily_window_days: u32,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `WAQI_TOKEN` – WAQI API token
///
/// Optional:
/// - `WAQI_API_URL` – upstream base URL (default: `https://api.waqi.info`)
/// - `WAQI_BOUNDS` – `latMin,lngMin,latMax,lngMax` (default: Delhi NCR)
/// - `HTTP_PORT` – listen port (default: 8080)
/// - `HTTP_TIMEOUT_SECS` – upstream request timeout (default: 10)
/// - `DAILY_WINDOW_DAYS` – default daily history window (default: 7)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let api_token = require_env!("WAQI_TOKEN");
    let api_url = env::var("WAQI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let bounds = env::var("WAQI_BOUNDS")
        .unwrap_or_else(|_| DEFAULT_BOUNDS.to_string())
        .parse::<BoundingBox>()?;
    let http_port = parse_env_u32!("HTTP_PORT", 8080);
    let http_timeout_secs = parse_env_u32!("HTTP_TIMEOUT_SECS", 10);
    let daily_window_days = parse_env_u32!("DAILY_WINDOW_DAYS", 7);

    if http_port > u32::from(u16::MAX) {
        bail!("Invalid HTTP_PORT: {} is out of range", http_port);
    }

    Ok(Config {
        api_token,
        api_url: api_url.trim_end_matches('/').to_string(),
        bounds,
        http_port,
        http_timeout_secs,
        daily_window_days,
    })
}

impl Config {
    /// Configuration with defaults for everything except the token.
    pub fn with_token(api_token: impl Into<String>) -> Result<Self> {
        // ---
        Ok(Config {
            api_token: api_token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            bounds: DEFAULT_BOUNDS.parse()?,
            http_port: 8080,
            http_timeout_secs: 10,
            daily_window_days: 7,
        })
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the API token while showing all other configuration values
    /// that were loaded.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  WAQI_TOKEN        : {}", mask_token(&self.api_token));
        tracing::info!("  WAQI_API_URL      : {}", self.api_url);
        tracing::info!("  WAQI_BOUNDS       : {}", self.bounds);
        tracing::info!("  HTTP_PORT         : {}", self.http_port);
        tracing::info!("  HTTP_TIMEOUT_SECS : {}", self.http_timeout_secs);
        tracing::info!("  DAILY_WINDOW_DAYS : {}", self.daily_window_days);
    }
}

/// Keep the first four characters of a token and hide the rest.
fn mask_token(token: &str) -> String {
    // ---
    match token.char_indices().nth(4) {
        Some((idx, _)) => format!("{}****", &token[..idx]),
        None => "****".to_string(),
    }
}
