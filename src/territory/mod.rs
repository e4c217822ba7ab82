//! Territories: persisted owned ground polygons with decaying strength

pub mod capture;

pub use capture::{assess_attack, found_territory, AttackOutcome};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{TerritoryId, UserId};
use crate::spatial::GroundPolygon;

/// Ownership strength of a freshly captured territory
pub const FULL_STRENGTH: f64 = 100.0;

/// One owned cell of claimed ground
///
/// `strength` is always within `[0, 100]`. It only moves when the capture
/// state machine processes an attack after the protection window lapsed;
/// a territory can sit at strength 0 under its owner indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub owner: UserId,
    pub polygon: GroundPolygon,
    pub area_m2: f64,
    pub strength: f64,
    pub last_captured_at: DateTime<Utc>,
    pub protection_hours: i64,
}

impl Territory {
    /// Instant the post-capture protection window closes
    pub fn protection_ends_at(&self) -> DateTime<Utc> {
        self.last_captured_at + Duration::hours(self.protection_hours)
    }

    /// Still inside the protection window at `now`
    pub fn is_protected(&self, now: DateTime<Utc>) -> bool {
        now < self.protection_ends_at()
    }

    /// Fractional hours elapsed since the last capture
    pub fn hours_since_capture(&self, now: DateTime<Utc>) -> f64 {
        (now - self.last_captured_at).num_milliseconds() as f64 / 3_600_000.0
    }
}
