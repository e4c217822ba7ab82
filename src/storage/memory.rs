//! In-memory store implementations
//!
//! Reference stores for the demo binary and tests. The geometric index
//! is a linear scan with the `geo` intersection predicate; a production
//! deployment would put a spatial index behind the same trait. Locks are
//! plain std mutexes held only across the map operation, never across an
//! await.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use geo::Intersects;

use crate::core::error::{GameError, Result};
use crate::core::types::{SessionId, TerritoryId, UserId};
use crate::session::RunSession;
use crate::spatial::GroundPolygon;
use crate::storage::{SessionStore, TerritoryStore, Versioned};
use crate::territory::Territory;

/// Sessions keyed by id, with the unique-active-per-owner constraint
/// enforced under the store lock
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, RunSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn create(&self, owner: UserId, now: DateTime<Utc>) -> Result<RunSession> {
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        if sessions.values().any(|s| s.owner == owner && s.is_active()) {
            return Err(GameError::DuplicateActiveSession(owner));
        }
        let session = RunSession::new(owner, now);
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get_active(&self, owner: UserId, id: SessionId) -> Result<RunSession> {
        let sessions = self.sessions.lock().expect("session store poisoned");
        sessions
            .get(&id)
            .filter(|s| s.owner == owner && s.is_active())
            .cloned()
            .ok_or(GameError::SessionNotFound(id))
    }

    async fn save(&self, session: &RunSession) -> Result<()> {
        let mut sessions = self.sessions.lock().expect("session store poisoned");
        sessions.insert(session.id, session.clone());
        Ok(())
    }
}

/// Territories keyed by id with per-record version counters
#[derive(Debug, Default)]
pub struct InMemoryTerritoryStore {
    territories: Mutex<HashMap<TerritoryId, Versioned<Territory>>>,
}

impl InMemoryTerritoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.territories.lock().expect("territory store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TerritoryStore for InMemoryTerritoryStore {
    async fn insert(&self, territory: Territory) -> Result<()> {
        let mut territories = self.territories.lock().expect("territory store poisoned");
        territories.insert(
            territory.id,
            Versioned {
                version: 1,
                record: territory,
            },
        );
        Ok(())
    }

    async fn get(&self, id: TerritoryId) -> Result<Option<Versioned<Territory>>> {
        let territories = self.territories.lock().expect("territory store poisoned");
        Ok(territories.get(&id).cloned())
    }

    async fn find_intersecting(&self, polygon: &GroundPolygon) -> Result<Vec<Versioned<Territory>>> {
        let candidate = polygon.to_geo();
        let territories = self.territories.lock().expect("territory store poisoned");
        Ok(territories
            .values()
            .filter(|v| v.record.polygon.to_geo().intersects(&candidate))
            .cloned()
            .collect())
    }

    async fn compare_and_swap(&self, expected_version: u64, territory: Territory) -> Result<bool> {
        let mut territories = self.territories.lock().expect("territory store poisoned");
        match territories.get_mut(&territory.id) {
            Some(stored) if stored.version == expected_version => {
                stored.version += 1;
                stored.record = territory;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
