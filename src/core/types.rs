//! Core type definitions used throughout the codebase

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for run sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for territories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerritoryId(pub Uuid);

impl TerritoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TerritoryId {
    fn default() -> Self {
        Self::new()
    }
}

/// One GPS fix inside a run session
///
/// Latitude/longitude are plain WGS-84 degrees. `accuracy_m` is the
/// device-reported horizontal accuracy radius; samples without one are
/// accepted as-is (the validator only rejects when a reported accuracy
/// exceeds the limit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub accuracy_m: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64, accuracy_m: Option<f64>, timestamp: DateTime<Utc>) -> Self {
        Self {
            lat,
            lng,
            accuracy_m,
            timestamp,
        }
    }

    /// Seconds elapsed since an earlier fix (negative if `earlier` is later)
    pub fn seconds_since(&self, earlier: &GeoPoint) -> f64 {
        (self.timestamp - earlier.timestamp).num_milliseconds() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_id_equality() {
        let a = UserId::new();
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, UserId::new());
    }

    #[test]
    fn test_ids_usable_as_map_keys() {
        use std::collections::HashMap;
        let id = TerritoryId::new();
        let mut map: HashMap<TerritoryId, &str> = HashMap::new();
        map.insert(id, "cell");
        assert_eq!(map.get(&id), Some(&"cell"));
    }

    #[test]
    fn test_seconds_since() {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let t1 = Utc.timestamp_opt(1_700_000_010, 500_000_000).unwrap();
        let a = GeoPoint::new(0.0, 0.0, None, t0);
        let b = GeoPoint::new(0.0, 0.0, None, t1);
        assert!((b.seconds_since(&a) - 10.5).abs() < 1e-9);
        assert!((a.seconds_since(&b) + 10.5).abs() < 1e-9);
    }
}
