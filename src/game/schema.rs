//! Typed request/response schema for the game-facing surface
//!
//! The HTTP collaborator deserializes into these structs and calls
//! `validate()` before anything reaches the engine, so malformed bodies
//! die at the boundary as `InvalidInput` instead of surfacing as numeric
//! garbage deep in the geometry.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::{SessionId, TerritoryId, UserId};
use crate::spatial::GroundPolygon;
use crate::territory::Territory;

/// One GPS sample submitted to an active session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushLocationRequest {
    pub session_id: SessionId,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub accuracy_m: Option<f64>,
    /// Client timestamp in epoch milliseconds; server time when absent
    #[serde(default)]
    pub timestamp_ms: Option<i64>,
}

impl PushLocationRequest {
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(GameError::InvalidInput(format!(
                "latitude out of range: {}",
                self.lat
            )));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(GameError::InvalidInput(format!(
                "longitude out of range: {}",
                self.lng
            )));
        }
        if let Some(acc) = self.accuracy_m {
            if !acc.is_finite() || acc < 0.0 {
                return Err(GameError::InvalidInput(format!("bad accuracy: {acc}")));
            }
        }
        Ok(())
    }

    /// Resolve the sample instant, defaulting to server time
    pub fn timestamp_or(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        match self.timestamp_ms {
            None => Ok(now),
            Some(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| GameError::InvalidInput(format!("bad timestamp: {ms} ms"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushLocationResponse {
    pub total_distance_m: f64,
    /// Accepted fixes so far, including this one
    pub accepted_points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndSessionRequest {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndSessionResponse {
    pub total_distance_m: f64,
    pub points_earned: i64,
    pub ended_at: DateTime<Utc>,
}

/// Map viewport query
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewBounds {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl ViewBounds {
    pub fn validate(&self) -> Result<()> {
        let values = [self.min_lng, self.min_lat, self.max_lng, self.max_lat];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(GameError::InvalidInput("non-finite view bounds".into()));
        }
        if self.min_lng >= self.max_lng || self.min_lat >= self.max_lat {
            return Err(GameError::InvalidInput(format!(
                "empty view bounds: [{}, {}] x [{}, {}]",
                self.min_lng, self.max_lng, self.min_lat, self.max_lat
            )));
        }
        Ok(())
    }

    pub fn to_polygon(&self) -> GroundPolygon {
        GroundPolygon::bounding_box(self.min_lng, self.min_lat, self.max_lng, self.max_lat)
    }
}

/// Territory as shown on the map, with derived protection fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryView {
    pub id: TerritoryId,
    pub owner: UserId,
    pub polygon: GroundPolygon,
    pub area_m2: f64,
    pub strength: f64,
    pub last_captured_at: DateTime<Utc>,
    pub protection_ends_at: DateTime<Utc>,
    pub protection_remaining_ms: i64,
}

impl TerritoryView {
    pub fn from_territory(territory: &Territory, now: DateTime<Utc>) -> Self {
        let protection_ends_at = territory.protection_ends_at();
        let protection_remaining_ms = (protection_ends_at - now).num_milliseconds().max(0);
        Self {
            id: territory.id,
            owner: territory.owner,
            polygon: territory.polygon.clone(),
            area_m2: territory.area_m2,
            strength: territory.strength,
            last_captured_at: territory.last_captured_at,
            protection_ends_at,
            protection_remaining_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::territory::found_territory;
    use crate::core::config::GameConfig;
    use chrono::Duration;

    fn request(lat: f64, lng: f64) -> PushLocationRequest {
        PushLocationRequest {
            session_id: SessionId::new(),
            lat,
            lng,
            accuracy_m: None,
            timestamp_ms: None,
        }
    }

    #[test]
    fn test_coordinate_bounds_checked() {
        assert!(request(48.85, 2.35).validate().is_ok());
        assert!(request(91.0, 0.0).validate().is_err());
        assert!(request(0.0, 181.0).validate().is_err());
        assert!(request(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_negative_accuracy_rejected() {
        let mut r = request(0.0, 0.0);
        r.accuracy_m = Some(-1.0);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_timestamp_defaults_to_server_time() {
        let now = Utc::now();
        let r = request(0.0, 0.0);
        assert_eq!(r.timestamp_or(now).unwrap(), now);

        let mut with_ts = request(0.0, 0.0);
        with_ts.timestamp_ms = Some(1_700_000_000_000);
        let ts = with_ts.timestamp_or(now).unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_view_bounds_must_be_ordered() {
        let good = ViewBounds {
            min_lng: 2.0,
            min_lat: 48.0,
            max_lng: 3.0,
            max_lat: 49.0,
        };
        assert!(good.validate().is_ok());
        assert_eq!(good.to_polygon().ring().len(), 5);

        let empty = ViewBounds {
            min_lng: 3.0,
            min_lat: 48.0,
            max_lng: 2.0,
            max_lat: 49.0,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_territory_view_protection_fields() {
        let now = Utc::now();
        let t = found_territory(
            UserId::new(),
            GroundPolygon::bounding_box(0.0, 0.0, 0.001, 0.001),
            100.0,
            now,
            &GameConfig::default(),
        );

        let view = TerritoryView::from_territory(&t, now + Duration::hours(10));
        assert_eq!(view.protection_ends_at, now + Duration::hours(24));
        assert_eq!(view.protection_remaining_ms, 14 * 3_600_000);

        let stale = TerritoryView::from_territory(&t, now + Duration::hours(30));
        assert_eq!(stale.protection_remaining_ms, 0);
    }
}
