//! Capture state machine: protection, decay, and ownership transfer
//!
//! Pure decision functions. The service layer reads territories, calls
//! [`assess_attack`], and writes the result back with a compare-and-swap;
//! keeping the decision side-effect free lets a conflicted write simply
//! re-read and re-assess.
//!
//! Per territory the machine is:
//! `Protected → (window lapses) → Decaying → (strength 0, different
//! claimant) → Captured`, which resets to `Protected` under the new
//! owner. A same-owner attack can park a territory at strength 0 without
//! transitioning.

use chrono::{DateTime, Utc};

use crate::core::config::GameConfig;
use crate::core::types::{TerritoryId, UserId};
use crate::spatial::GroundPolygon;
use crate::territory::{Territory, FULL_STRENGTH};

/// Result of one claimant attacking one overlapped territory
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    /// Protection window still open: nothing changes, nothing is written
    Protected,
    /// Decay applied; same owner, or strength still above zero.
    /// The updated record must be persisted even without a transfer.
    Decayed(Territory),
    /// Strength hit zero under a different claimant: ownership moves,
    /// strength and protection reset, capture bonus is due
    Captured(Territory),
}

impl AttackOutcome {
    /// Updated record to persist, if any
    pub fn updated(&self) -> Option<&Territory> {
        match self {
            AttackOutcome::Protected => None,
            AttackOutcome::Decayed(t) | AttackOutcome::Captured(t) => Some(t),
        }
    }

    pub fn awards_bonus(&self) -> bool {
        matches!(self, AttackOutcome::Captured(_))
    }
}

/// Apply protection, decay, and transfer rules for one attack
///
/// Order independence: the outcome for a territory depends only on that
/// territory's record, the claimant, and `now` — never on other
/// territories overlapped by the same run.
pub fn assess_attack(
    territory: &Territory,
    claimant: UserId,
    now: DateTime<Utc>,
    cfg: &GameConfig,
) -> AttackOutcome {
    if territory.is_protected(now) {
        return AttackOutcome::Protected;
    }

    let decay = territory.hours_since_capture(now) * cfg.decay_per_hour;
    let strength = (territory.strength - decay).max(0.0);

    if strength <= 0.0 && territory.owner != claimant {
        let mut captured = territory.clone();
        captured.owner = claimant;
        captured.strength = FULL_STRENGTH;
        captured.last_captured_at = now;
        captured.protection_hours = cfg.protection_hours;
        return AttackOutcome::Captured(captured);
    }

    let mut decayed = territory.clone();
    decayed.strength = strength;
    AttackOutcome::Decayed(decayed)
}

/// Create the territory for a claim overlapping nothing
pub fn found_territory(
    claimant: UserId,
    polygon: GroundPolygon,
    area_m2: f64,
    now: DateTime<Utc>,
    cfg: &GameConfig,
) -> Territory {
    Territory {
        id: TerritoryId::new(),
        owner: claimant,
        polygon,
        area_m2,
        strength: FULL_STRENGTH,
        last_captured_at: now,
        protection_hours: cfg.protection_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn cfg() -> GameConfig {
        GameConfig::default()
    }

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn territory(owner: UserId, strength: f64, captured_at: DateTime<Utc>) -> Territory {
        Territory {
            id: TerritoryId::new(),
            owner,
            polygon: GroundPolygon::bounding_box(0.0, 0.0, 0.001, 0.001),
            area_m2: 12_000.0,
            strength,
            last_captured_at: captured_at,
            protection_hours: 24,
        }
    }

    #[test]
    fn test_protected_territory_untouched() {
        let owner = UserId::new();
        let t = territory(owner, 100.0, t0());
        let outcome = assess_attack(&t, UserId::new(), t0() + Duration::hours(23), &cfg());
        assert_eq!(outcome, AttackOutcome::Protected);
        assert!(outcome.updated().is_none());
        assert!(!outcome.awards_bonus());
    }

    #[test]
    fn test_expired_window_transfers_to_different_claimant() {
        // 30 hours since capture: decay 300, strength floors at 0
        let t = territory(UserId::new(), 100.0, t0());
        let claimant = UserId::new();
        let now = t0() + Duration::hours(30);
        match assess_attack(&t, claimant, now, &cfg()) {
            AttackOutcome::Captured(c) => {
                assert_eq!(c.owner, claimant);
                assert_eq!(c.strength, FULL_STRENGTH);
                assert_eq!(c.last_captured_at, now);
                assert_eq!(c.protection_hours, 24);
                assert_eq!(c.id, t.id);
            }
            other => panic!("expected capture, got {other:?}"),
        }
    }

    #[test]
    fn test_same_owner_decays_to_zero_without_reset() {
        let owner = UserId::new();
        let t = territory(owner, 100.0, t0());
        let now = t0() + Duration::hours(30);
        match assess_attack(&t, owner, now, &cfg()) {
            AttackOutcome::Decayed(d) => {
                assert_eq!(d.owner, owner);
                assert_eq!(d.strength, 0.0);
                // No reset: timestamps untouched, still unprotected
                assert_eq!(d.last_captured_at, t.last_captured_at);
                assert!(!d.is_protected(now));
            }
            other => panic!("expected decay, got {other:?}"),
        }
    }

    #[test]
    fn test_decay_persisted_even_without_transfer() {
        // Protection lapsed but decay alone cannot floor the strength
        // with a softer decay rate; record must still be updated.
        let soft = GameConfig {
            decay_per_hour: 1.0,
            ..GameConfig::default()
        };
        let t = territory(UserId::new(), 100.0, t0());
        let now = t0() + Duration::hours(30);
        match assess_attack(&t, UserId::new(), now, &soft) {
            AttackOutcome::Decayed(d) => {
                assert!((d.strength - 70.0).abs() < 1e-9);
                assert_eq!(d.owner, t.owner);
            }
            other => panic!("expected decay, got {other:?}"),
        }
    }

    #[test]
    fn test_strength_never_negative() {
        let t = territory(UserId::new(), 10.0, t0());
        let now = t0() + Duration::hours(200);
        let outcome = assess_attack(&t, t.owner, now, &cfg());
        let updated = outcome.updated().unwrap();
        assert_eq!(updated.strength, 0.0);
    }

    #[test]
    fn test_found_territory_starts_protected() {
        let claimant = UserId::new();
        let poly = GroundPolygon::bounding_box(2.35, 48.85, 2.351, 48.851);
        let t = found_territory(claimant, poly, 9_000.0, t0(), &cfg());
        assert_eq!(t.owner, claimant);
        assert_eq!(t.strength, FULL_STRENGTH);
        assert!(t.is_protected(t0() + Duration::hours(23)));
        assert!((t.area_m2 - 9_000.0).abs() < f64::EPSILON);
    }
}
