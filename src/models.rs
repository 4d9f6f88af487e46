//! Data models for the WAQI upstream and the stations served to the dashboard.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::levels::{classify, Level};

// ---

/// AQI used when the upstream list has no usable reading for a station.
pub const FALLBACK_AQI: i64 = 50;

/// Dominant pollutant assumed until the station detail has been fetched.
pub const DEFAULT_DOMINANT: &str = "pm25";

/// Response envelope shared by all WAQI endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    // ---
    pub status: String,
    #[serde(default)]
    pub data: Value,
}

/// One entry of the `/map/bounds/` station list.
#[derive(Debug, Deserialize)]
pub struct RawMapStation {
    // ---
    pub uid: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub aqi: Value,
    pub station: RawStationName,
}

#[derive(Debug, Deserialize)]
pub struct RawStationName {
    pub name: String,
}

/// Payload of the `/feed/@{id}/` station detail.
#[derive(Debug, Deserialize)]
pub struct RawFeed {
    // ---
    #[serde(default)]
    pub aqi: Value,
    pub idx: Option<i64>,
    #[serde(rename = "dominentpol")]
    pub dominant: Option<String>,
    #[serde(default)]
    pub iaqi: BTreeMap<String, RawIaqiValue>,
    pub time: Option<RawFeedTime>,
    pub city: Option<RawCity>,
}

#[derive(Debug, Deserialize)]
pub struct RawIaqiValue {
    pub v: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawFeedTime {
    pub s: String,
}

#[derive(Debug, Deserialize)]
pub struct RawCity {
    // ---
    pub name: String,
    #[serde(default)]
    pub geo: Vec<f64>,
}

/// A monitoring station as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    // ---
    pub id: i64,
    /// Name up to the first comma, e.g. `"Anand Vihar"`.
    pub name: String,
    pub full_name: String,
    pub lat: f64,
    pub lng: f64,
    pub aqi: i64,
    pub level: Level,
    /// Marker color for the station's level.
    pub color: &'static str,
    pub dominant: String,
    /// Sensor readings keyed by sensor type (`pm25`, `t`, `h`, `w`, `p`, ...).
    pub iaqi: BTreeMap<String, f64>,
    pub time: String,
}

/// Transformation helpers
impl RawMapStation {
    // ---
    /// Convert to a [`Station`], or `None` if the entry should not be shown.
    ///
    /// Entries without finite coordinates or with a non-positive AQI are
    /// dropped. A missing or `"-"` AQI falls back to [`FALLBACK_AQI`].
    pub fn to_station(&self) -> Option<Station> {
        // ---
        let lat = self.lat.filter(|v| v.is_finite())?;
        let lng = self.lon.filter(|v| v.is_finite())?;
        let aqi = parse_aqi(&self.aqi).unwrap_or(FALLBACK_AQI);
        if aqi <= 0 {
            return None;
        }

        let band = classify(aqi as f64);
        Some(Station {
            id: self.uid,
            name: short_name(&self.station.name),
            full_name: self.station.name.clone(),
            lat,
            lng,
            aqi,
            level: band.level,
            color: band.color,
            dominant: DEFAULT_DOMINANT.to_string(),
            iaqi: BTreeMap::new(),
            time: Utc::now().to_rfc3339(),
        })
    }
}

impl Station {
    /// Merge a station detail payload into this station.
    ///
    /// A missing or `"-"` AQI in the detail keeps the current reading.
    pub fn apply_feed(&mut self, feed: &RawFeed) {
        // ---
        if let Some(aqi) = parse_aqi(&feed.aqi) {
            self.set_aqi(aqi);
        }
        if let Some(dominant) = &feed.dominant {
            self.dominant = dominant.clone();
        }
        self.iaqi = feed.iaqi.iter().map(|(k, v)| (k.clone(), v.v)).collect();
        if let Some(time) = &feed.time {
            self.time = time.s.clone();
        }
        if let Some(city) = &feed.city {
            self.name = short_name(&city.name);
            self.full_name = city.name.clone();
        }
    }

    /// Build a station from a detail payload alone.
    ///
    /// Used when the station is not in the last known list. Returns `None`
    /// if the payload has no usable coordinates.
    pub fn from_feed(id: i64, feed: &RawFeed) -> Option<Station> {
        // ---
        let city = feed.city.as_ref()?;
        let (lat, lng) = match city.geo[..] {
            [lat, lng, ..] if lat.is_finite() && lng.is_finite() => (lat, lng),
            _ => return None,
        };

        let raw = RawMapStation {
            uid: feed.idx.unwrap_or(id),
            lat: Some(lat),
            lon: Some(lng),
            aqi: feed.aqi.clone(),
            station: RawStationName {
                name: city.name.clone(),
            },
        };
        let mut station = raw.to_station()?;
        station.apply_feed(feed);
        Some(station)
    }

    fn set_aqi(&mut self, aqi: i64) {
        // ---
        let band = classify(aqi as f64);
        self.aqi = aqi;
        self.level = band.level;
        self.color = band.color;
    }
}

/// Read an upstream AQI that may be a number, a numeric string, or `"-"`.
///
/// Strings are read by their leading integer digits, so `"152"` and
/// `"152*"` both give 152.
pub fn parse_aqi(value: &Value) -> Option<i64> {
    // ---
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            let (sign, digits) = match s.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, s.strip_prefix('+').unwrap_or(s)),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}

fn short_name(full: &str) -> String {
    full.split(',').next().unwrap_or(full).trim().to_string()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use serde_json::json;

    fn raw_station(aqi: Value) -> RawMapStation {
        // ---
        serde_json::from_value(json!({
            "uid": 7024,
            "lat": 28.647,
            "lon": 77.316,
            "aqi": aqi,
            "station": { "name": "Anand Vihar, Delhi, India" }
        }))
        .unwrap()
    }

    fn raw_feed() -> RawFeed {
        // ---
        serde_json::from_value(json!({
            "aqi": 212,
            "idx": 7024,
            "dominentpol": "pm10",
            "iaqi": { "pm25": { "v": 212 }, "t": { "v": 24.5 }, "h": { "v": 61 } },
            "time": { "s": "2024-11-05 18:00:00", "tz": "+05:30" },
            "city": { "name": "Anand Vihar New, Delhi", "geo": [28.65, 77.31] }
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_aqi_variants() {
        // ---
        assert_eq!(parse_aqi(&json!(152)), Some(152));
        assert_eq!(parse_aqi(&json!(152.8)), Some(152));
        assert_eq!(parse_aqi(&json!("152")), Some(152));
        assert_eq!(parse_aqi(&json!(" 87*")), Some(87));
        assert_eq!(parse_aqi(&json!("-")), None);
        assert_eq!(parse_aqi(&json!("-12")), Some(-12));
        assert_eq!(parse_aqi(&json!("abc")), None);
        assert_eq!(parse_aqi(&Value::Null), None);
    }

    #[test]
    fn test_to_station_classifies() {
        // ---
        let station = raw_station(json!("152")).to_station().unwrap();

        assert_eq!(station.id, 7024);
        assert_eq!(station.name, "Anand Vihar");
        assert_eq!(station.full_name, "Anand Vihar, Delhi, India");
        assert_eq!(station.aqi, 152);
        assert_eq!(station.level, Level::Unhealthy);
        assert_eq!(station.color, "#EF4444");
        assert_eq!(station.dominant, "pm25");
        assert!(station.iaqi.is_empty());
    }

    #[test]
    fn test_to_station_fallback_and_filters() {
        // ---
        assert_eq!(raw_station(json!("-")).to_station().unwrap().aqi, FALLBACK_AQI);
        assert_eq!(raw_station(Value::Null).to_station().unwrap().aqi, FALLBACK_AQI);
        assert!(raw_station(json!(0)).to_station().is_none());
        assert!(raw_station(json!("-5")).to_station().is_none());

        let mut no_coords = raw_station(json!(80));
        no_coords.lat = None;
        assert!(no_coords.to_station().is_none());

        let mut nan_coords = raw_station(json!(80));
        nan_coords.lon = Some(f64::NAN);
        assert!(nan_coords.to_station().is_none());
    }

    #[test]
    fn test_apply_feed_merges_detail() {
        // ---
        let mut station = raw_station(json!(90)).to_station().unwrap();
        station.apply_feed(&raw_feed());

        assert_eq!(station.aqi, 212);
        assert_eq!(station.level, Level::VeryUnhealthy);
        assert_eq!(station.dominant, "pm10");
        assert_eq!(station.iaqi.get("t"), Some(&24.5));
        assert_eq!(station.iaqi.get("h"), Some(&61.0));
        assert_eq!(station.time, "2024-11-05 18:00:00");
        assert_eq!(station.name, "Anand Vihar New");
    }

    #[test]
    fn test_apply_feed_keeps_aqi_on_dash() {
        // ---
        let mut station = raw_station(json!(90)).to_station().unwrap();
        let mut feed = raw_feed();
        feed.aqi = json!("-");
        station.apply_feed(&feed);

        assert_eq!(station.aqi, 90);
        assert_eq!(station.level, Level::Moderate);
    }

    #[test]
    fn test_from_feed() {
        // ---
        let station = Station::from_feed(1, &raw_feed()).unwrap();
        assert_eq!(station.id, 7024);
        assert_eq!(station.lat, 28.65);
        assert_eq!(station.aqi, 212);

        let mut feed = raw_feed();
        feed.city.as_mut().unwrap().geo.clear();
        assert!(Station::from_feed(1, &feed).is_none());
    }
}
