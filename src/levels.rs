//! Severity bands for AQI values.
//!
//! Six contiguous bands cover every non-negative value. The last band has
//! no upper bound, so classification never needs a fallback.

use serde::Serialize;

/// Severity tier, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Level {
    // ---
    Good,
    Moderate,
    Sensitive,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

/// Inclusive upper edge of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum UpperBound {
    AtMost(u32),
    Unbounded,
}

impl UpperBound {
    fn admits(self, value: f64) -> bool {
        match self {
            UpperBound::AtMost(max) => value <= f64::from(max),
            UpperBound::Unbounded => true,
        }
    }
}

/// One labeled, colored AQI range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityBand {
    // ---
    pub level: Level,
    pub min: u32,
    pub max: UpperBound,
    pub label: &'static str,
    pub color: &'static str,
}

/// All bands in ascending severity order.
pub static BANDS: [SeverityBand; 6] = [
    SeverityBand {
        level: Level::Good,
        min: 0,
        max: UpperBound::AtMost(50),
        label: "Good",
        color: "#10B981",
    },
    SeverityBand {
        level: Level::Moderate,
        min: 51,
        max: UpperBound::AtMost(100),
        label: "Moderate",
        color: "#F59E0B",
    },
    SeverityBand {
        level: Level::Sensitive,
        min: 101,
        max: UpperBound::AtMost(150),
        label: "Sensitive",
        color: "#F97316",
    },
    SeverityBand {
        level: Level::Unhealthy,
        min: 151,
        max: UpperBound::AtMost(200),
        label: "Unhealthy",
        color: "#EF4444",
    },
    SeverityBand {
        level: Level::VeryUnhealthy,
        min: 201,
        max: UpperBound::AtMost(300),
        label: "Very Unhealthy",
        color: "#A855F7",
    },
    SeverityBand {
        level: Level::Hazardous,
        min: 301,
        max: UpperBound::Unbounded,
        label: "Hazardous",
        color: "#7f1d1d",
    },
];

/// Map an AQI value to its band.
///
/// Non-finite input counts as 0 and negative values land in the lowest band.
/// Fractional values between two integer ranges (e.g. 50.5) belong to the
/// higher one.
pub fn classify(value: f64) -> &'static SeverityBand {
    // ---
    let value = if value.is_finite() { value } else { 0.0 };
    BANDS
        .iter()
        .find(|band| band.max.admits(value))
        .unwrap_or(&BANDS[BANDS.len() - 1])
}
