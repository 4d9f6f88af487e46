//! Summary figures for the dashboard's KPI cards.

use serde::Serialize;

use crate::models::Station;

/// AQI above which a station counts as hazardous in the network summary.
pub const HAZARDOUS_THRESHOLD: i64 = 200;

/// Aggregate over all listed stations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    // ---
    pub count: usize,
    pub avg: i64,
    pub max: i64,
    pub min: i64,
    pub hazardous: usize,
}

/// Aggregate over one station's series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesSummary {
    // ---
    pub avg: i64,
    pub max: i64,
    pub min: i64,
}

impl NetworkSummary {
    /// Summarize a station list; an empty list gives all zeros.
    pub fn from_stations(stations: &[Station]) -> Self {
        // ---
        let values: Vec<i64> = stations.iter().map(|s| s.aqi).collect();
        let Some(series) = SeriesSummary::from_values(&values) else {
            return NetworkSummary::default();
        };

        NetworkSummary {
            count: stations.len(),
            avg: series.avg,
            max: series.max,
            min: series.min,
            hazardous: values.iter().filter(|v| **v > HAZARDOUS_THRESHOLD).count(),
        }
    }
}

impl SeriesSummary {
    /// Average (rounded half away from zero), max and min, or `None` for an
    /// empty series.
    pub fn from_values(values: &[i64]) -> Option<Self> {
        // ---
        let max = *values.iter().max()?;
        let min = *values.iter().min()?;
        let total: i64 = values.iter().sum();
        let avg = (total as f64 / values.len() as f64).round() as i64;

        Some(SeriesSummary { avg, max, min })
    }
}
