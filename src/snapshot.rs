//! Last known station list, shared across requests.
//!
//! Refreshed on every successful list fetch and updated with merged details.
//! Handlers fall back to it when the upstream is unavailable and read live
//! AQI values from it for the history endpoints.

use std::sync::{Arc, PoisonError, RwLock};

use crate::models::Station;

// ---

#[derive(Debug, Clone, Default)]
pub struct StationSnapshot {
    inner: Arc<RwLock<Vec<Station>>>,
}

impl StationSnapshot {
    /// Replace the whole list.
    pub fn replace(&self, stations: Vec<Station>) {
        // ---
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = stations;
    }

    /// Insert a station or overwrite the entry with the same id.
    pub fn upsert(&self, station: Station) {
        // ---
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match guard.iter_mut().find(|s| s.id == station.id) {
            Some(existing) => *existing = station,
            None => guard.push(station),
        }
    }

    pub fn get(&self, id: i64) -> Option<Station> {
        // ---
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.iter().find(|s| s.id == id).cloned()
    }

    /// Current AQI of a known station.
    pub fn live_aqi(&self, id: i64) -> Option<i64> {
        self.get(id).map(|s| s.aqi)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::RawMapStation;
    use serde_json::json;

    fn station(id: i64, aqi: i64) -> Station {
        // ---
        let raw: RawMapStation = serde_json::from_value(json!({
            "uid": id,
            "lat": 28.6,
            "lon": 77.2,
            "aqi": aqi,
            "station": { "name": "Test, Delhi" }
        }))
        .unwrap();
        raw.to_station().unwrap()
    }

    #[test]
    fn test_replace_and_get() {
        // ---
        let snapshot = StationSnapshot::default();
        assert!(snapshot.is_empty());

        snapshot.replace(vec![station(1, 80), station(2, 120)]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.live_aqi(2), Some(120));
        assert_eq!(snapshot.get(3), None);

        snapshot.replace(vec![station(3, 40)]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(1), None);
    }

    #[test]
    fn test_upsert() {
        // ---
        let snapshot = StationSnapshot::default();
        snapshot.replace(vec![station(1, 80)]);

        snapshot.upsert(station(1, 300));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.live_aqi(1), Some(300));

        snapshot.upsert(station(2, 60));
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        // ---
        let snapshot = StationSnapshot::default();
        let handle = snapshot.clone();
        handle.replace(vec![station(1, 80)]);
        assert_eq!(snapshot.live_aqi(1), Some(80));
    }
}
