//! Run sessions: the timed GPS recording a player turns into a claim

pub mod validator;

pub use validator::MovementValidator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{GeoPoint, SessionId, UserId};

/// One timed run by one player
///
/// Owns everything the movement validator needs: the accepted points and
/// the running distance total. Exactly one session per player may be
/// active at a time (enforced by the session store on creation).
/// `end()` is a one-way transition; an ended session is never mutated
/// again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSession {
    pub id: SessionId,
    pub owner: UserId,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Accepted fixes in arrival order; timestamps strictly increase
    pub points: Vec<GeoPoint>,
    /// Sum of pairwise great-circle distances over accepted fixes
    pub total_distance_m: f64,
    pub points_earned: i64,
}

impl RunSession {
    pub fn new(owner: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            owner,
            started_at: now,
            ended_at: None,
            points: Vec::new(),
            total_distance_m: 0.0,
            points_earned: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Last accepted fix, if any
    pub fn last_point(&self) -> Option<&GeoPoint> {
        self.points.last()
    }

    /// Close the session. Idempotent guard lives in the caller; the
    /// store only hands out active sessions.
    pub fn end(&mut self, now: DateTime<Utc>) {
        self.ended_at = Some(now);
    }
}
