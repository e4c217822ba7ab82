//! Game service: the operations the transport layer calls
//!
//! Orchestrates the core pipeline: sample validation while a session is
//! active, then on session end buffering the path into a corridor
//! polygon, measuring it, resolving overlaps through the territory
//! store, and running the capture state machine with compare-and-swap
//! writes.

pub mod schema;

pub use schema::{
    EndSessionRequest, EndSessionResponse, PushLocationRequest, PushLocationResponse,
    StartSessionResponse, TerritoryView, ViewBounds,
};

use chrono::{DateTime, Utc};

use crate::core::config::{config, GameConfig};
use crate::core::error::{GameError, Result};
use crate::core::types::{GeoPoint, UserId};
use crate::session::MovementValidator;
use crate::spatial::{buffer_path, polygon_area_m2, GroundPolygon};
use crate::storage::{SessionStore, TerritoryStore, Versioned};
use crate::territory::{assess_attack, found_territory, Territory};

/// The engine's front door, generic over its storage collaborators
pub struct GameService<S, T> {
    sessions: S,
    territories: T,
    validator: MovementValidator,
    cfg: &'static GameConfig,
}

impl<S: SessionStore, T: TerritoryStore> GameService<S, T> {
    pub fn new(sessions: S, territories: T) -> Self {
        let cfg = config();
        Self {
            sessions,
            territories,
            validator: MovementValidator::from_config(cfg),
            cfg,
        }
    }

    /// Start a run; one active session per user
    pub async fn start_session(&self, owner: UserId) -> Result<StartSessionResponse> {
        let session = self.sessions.create(owner, Utc::now()).await?;
        tracing::info!(user = ?owner, session = ?session.id, "session started");
        Ok(StartSessionResponse {
            session_id: session.id,
            started_at: session.started_at,
        })
    }

    /// Submit one GPS sample; any rejection fails the whole call and
    /// leaves the session untouched
    pub async fn push_location(
        &self,
        owner: UserId,
        request: PushLocationRequest,
    ) -> Result<PushLocationResponse> {
        request.validate()?;
        let now = Utc::now();
        let mut session = self.sessions.get_active(owner, request.session_id).await?;

        let sample = GeoPoint::new(
            request.lat,
            request.lng,
            request.accuracy_m,
            request.timestamp_or(now)?,
        );
        self.validator.accept(&mut session, sample)?;
        self.sessions.save(&session).await?;

        Ok(PushLocationResponse {
            total_distance_m: session.total_distance_m,
            accepted_points: session.points.len(),
        })
    }

    /// End a run: finalize base points, then claim ground
    ///
    /// With fewer than 2 accepted points the capture step is skipped
    /// entirely and the session still ends with base points only.
    pub async fn end_session(
        &self,
        owner: UserId,
        request: EndSessionRequest,
    ) -> Result<EndSessionResponse> {
        let now = Utc::now();
        let mut session = self.sessions.get_active(owner, request.session_id).await?;

        session.end(now);
        session.points_earned = base_points(session.total_distance_m, self.cfg);
        self.sessions.save(&session).await?;

        if session.points.len() >= 2 {
            let polygon = buffer_path(&session.points, self.cfg.buffer_width_m)?;
            let area_m2 = polygon_area_m2(&polygon);
            let bonus = self.capture_overlaps(owner, polygon, area_m2, now).await?;
            session.points_earned += bonus;
            self.sessions.save(&session).await?;
        }

        tracing::info!(
            user = ?owner,
            session = ?session.id,
            distance_m = session.total_distance_m,
            points = session.points_earned,
            "session ended"
        );

        Ok(EndSessionResponse {
            total_distance_m: session.total_distance_m,
            points_earned: session.points_earned,
            ended_at: now,
        })
    }

    /// Territories intersecting a map viewport, with protection countdowns
    pub async fn territories_in_view(&self, bounds: ViewBounds) -> Result<Vec<TerritoryView>> {
        bounds.validate()?;
        let now = Utc::now();
        let hits = self.territories.find_intersecting(&bounds.to_polygon()).await?;
        Ok(hits
            .iter()
            .map(|v| TerritoryView::from_territory(&v.record, now))
            .collect())
    }

    /// Overlap resolution plus the capture state machine; returns the
    /// total capture bonus earned
    async fn capture_overlaps(
        &self,
        claimant: UserId,
        polygon: GroundPolygon,
        area_m2: f64,
        now: DateTime<Utc>,
    ) -> Result<i64> {
        let overlapping = self.territories.find_intersecting(&polygon).await?;

        if overlapping.is_empty() {
            let territory = found_territory(claimant, polygon, area_m2, now, self.cfg);
            tracing::info!(territory = ?territory.id, owner = ?claimant, area_m2, "territory founded");
            self.territories.insert(territory).await?;
            return Ok(self.cfg.capture_bonus);
        }

        let mut bonus = 0;
        for versioned in overlapping {
            if self.attack_territory(claimant, versioned, now).await? {
                bonus += self.cfg.capture_bonus;
            }
        }
        Ok(bonus)
    }

    /// Attack one overlapped territory, retrying the read-assess-write
    /// cycle on version conflicts. Returns whether a capture happened.
    async fn attack_territory(
        &self,
        claimant: UserId,
        mut versioned: Versioned<Territory>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        for _ in 0..self.cfg.max_write_attempts {
            let outcome = assess_attack(&versioned.record, claimant, now, self.cfg);
            let Some(updated) = outcome.updated() else {
                // Still protected; nothing to write
                return Ok(false);
            };

            if self
                .territories
                .compare_and_swap(versioned.version, updated.clone())
                .await?
            {
                if outcome.awards_bonus() {
                    tracing::info!(
                        territory = ?updated.id,
                        new_owner = ?claimant,
                        "territory captured"
                    );
                }
                return Ok(outcome.awards_bonus());
            }

            // Lost the race; re-read and re-assess against fresh state
            match self.territories.get(versioned.record.id).await? {
                Some(fresh) => versioned = fresh,
                None => return Ok(false),
            }
        }

        Err(GameError::StorageConflict(self.cfg.max_write_attempts))
    }
}

/// Base score: `floor(distance_km * points_per_km)`
pub fn base_points(distance_m: f64, cfg: &GameConfig) -> i64 {
    (distance_m / 1000.0 * cfg.points_per_km).floor() as i64
}
