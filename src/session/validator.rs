//! Movement validation: the single anti-cheat gate for GPS samples
//!
//! Every acceptance decision in the game goes through this one validator,
//! so the accepted-distance ledger can never include an increment a
//! rejected sample produced. A rejection fails the whole submission; the
//! session is untouched.

use crate::core::config::GameConfig;
use crate::core::error::{GameError, Result};
use crate::core::types::GeoPoint;
use crate::session::RunSession;
use crate::spatial::sphere::haversine_distance_m;

/// Seconds-to-hours factor for m/s → km/h
const MS_TO_KMH: f64 = 3.6;

/// Stateless validator; per-session state (last fix, running distance)
/// lives on the [`RunSession`] itself
#[derive(Debug, Clone, Copy)]
pub struct MovementValidator {
    max_speed_kmh: f64,
    max_accuracy_m: f64,
}

impl MovementValidator {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            max_speed_kmh: cfg.max_speed_kmh,
            max_accuracy_m: cfg.max_accuracy_m,
        }
    }

    /// Validate one sample against the session's last accepted fix and,
    /// on success, append it and grow the distance total
    ///
    /// Checks in order:
    /// 1. reported accuracy within limit (when reported);
    /// 2. first fix is accepted unconditionally, contributing no distance;
    /// 3. timestamp strictly after the last accepted fix;
    /// 4. implied speed within limit.
    ///
    /// Returns the distance added in meters (0.0 for the first fix).
    pub fn accept(&self, session: &mut RunSession, sample: GeoPoint) -> Result<f64> {
        if let Some(accuracy_m) = sample.accuracy_m {
            if accuracy_m > self.max_accuracy_m {
                tracing::debug!(session = ?session.id, accuracy_m, "rejecting low-accuracy fix");
                return Err(GameError::LowAccuracy {
                    accuracy_m,
                    limit_m: self.max_accuracy_m,
                });
            }
        }

        let Some(last) = session.last_point() else {
            session.points.push(sample);
            return Ok(0.0);
        };

        let dt_seconds = sample.seconds_since(last);
        if dt_seconds <= 0.0 {
            tracing::debug!(session = ?session.id, dt_seconds, "rejecting non-monotonic fix");
            return Err(GameError::NonMonotonicTime { dt_seconds });
        }

        let distance_m = haversine_distance_m(last.lat, last.lng, sample.lat, sample.lng);
        let speed_kmh = distance_m / dt_seconds * MS_TO_KMH;
        if speed_kmh > self.max_speed_kmh {
            tracing::debug!(session = ?session.id, speed_kmh, "rejecting over-speed fix");
            return Err(GameError::ExcessiveSpeed {
                speed_kmh,
                limit_kmh: self.max_speed_kmh,
            });
        }

        session.total_distance_m += distance_m;
        session.points.push(sample);
        Ok(distance_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UserId;
    use chrono::{Duration, TimeZone, Utc};

    fn validator() -> MovementValidator {
        MovementValidator::from_config(&GameConfig::default())
    }

    fn session() -> RunSession {
        RunSession::new(UserId::new(), Utc.timestamp_opt(1_700_000_000, 0).unwrap())
    }

    fn fix(lat: f64, lng: f64, offset_s: i64) -> GeoPoint {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        GeoPoint::new(lat, lng, Some(5.0), t0 + Duration::seconds(offset_s))
    }

    #[test]
    fn test_first_fix_accepted_without_distance() {
        let mut s = session();
        let added = validator().accept(&mut s, fix(48.85, 2.35, 0)).unwrap();
        assert_eq!(added, 0.0);
        assert_eq!(s.points.len(), 1);
        assert_eq!(s.total_distance_m, 0.0);
    }

    #[test]
    fn test_low_accuracy_rejected_even_when_stationary() {
        let mut s = session();
        validator().accept(&mut s, fix(48.85, 2.35, 0)).unwrap();
        let mut bad = fix(48.85, 2.35, 10);
        bad.accuracy_m = Some(31.0);
        let err = validator().accept(&mut s, bad).unwrap_err();
        assert!(matches!(err, GameError::LowAccuracy { .. }));
        assert_eq!(s.points.len(), 1);
    }

    #[test]
    fn test_missing_accuracy_is_accepted() {
        let mut s = session();
        let mut p = fix(48.85, 2.35, 0);
        p.accuracy_m = None;
        assert!(validator().accept(&mut s, p).is_ok());
    }

    #[test]
    fn test_non_monotonic_timestamp_rejected() {
        let mut s = session();
        validator().accept(&mut s, fix(48.85, 2.35, 10)).unwrap();
        let err = validator().accept(&mut s, fix(48.8501, 2.35, 10)).unwrap_err();
        assert!(matches!(err, GameError::NonMonotonicTime { .. }));
        let err = validator().accept(&mut s, fix(48.8501, 2.35, 5)).unwrap_err();
        assert!(matches!(err, GameError::NonMonotonicTime { .. }));
        assert_eq!(s.total_distance_m, 0.0);
    }

    #[test]
    fn test_excessive_speed_rejected_without_mutation() {
        let mut s = session();
        validator().accept(&mut s, fix(48.85, 2.35, 0)).unwrap();
        // ~1.1 km in 10 s is ~400 km/h
        let err = validator().accept(&mut s, fix(48.86, 2.35, 10)).unwrap_err();
        assert!(matches!(err, GameError::ExcessiveSpeed { .. }));
        assert_eq!(s.points.len(), 1);
        assert_eq!(s.total_distance_m, 0.0);
    }

    #[test]
    fn test_distance_accumulates_over_walk() {
        let mut s = session();
        let v = validator();
        // ~11 m hops every 10 s, ~4 km/h
        v.accept(&mut s, fix(48.8500, 2.35, 0)).unwrap();
        v.accept(&mut s, fix(48.8501, 2.35, 10)).unwrap();
        v.accept(&mut s, fix(48.8502, 2.35, 20)).unwrap();
        assert_eq!(s.points.len(), 3);
        assert!((s.total_distance_m - 22.2).abs() < 0.5, "got {}", s.total_distance_m);
    }
}
