//! Storage collaborator contracts
//!
//! The engine core never talks to a database directly; it goes through
//! these traits. They are the only async seam in the crate — every other
//! operation is a pure or in-memory computation.
//!
//! Territory writes use optimistic concurrency: reads hand back a
//! [`Versioned`] record and writes go through `compare_and_swap`, so two
//! runs ending on the same cell can never both apply a stale decision.

// Callers stay generic over the store types; no dyn dispatch, no Send
// bound needed on the returned futures.
#![allow(async_fn_in_trait)]

pub mod memory;

pub use memory::{InMemorySessionStore, InMemoryTerritoryStore};

use chrono::{DateTime, Utc};

use crate::core::error::Result;
use crate::core::types::{SessionId, TerritoryId, UserId};
use crate::session::RunSession;
use crate::spatial::GroundPolygon;
use crate::territory::Territory;

/// A record plus the version it was read at
#[derive(Debug, Clone)]
pub struct Versioned<T> {
    pub version: u64,
    pub record: T,
}

/// Append-only session log plus the one-active-session constraint
pub trait SessionStore {
    /// Create a session for `owner`; fails with `DuplicateActiveSession`
    /// if the owner already has one. The check-and-create is atomic with
    /// respect to concurrent calls for the same owner.
    async fn create(&self, owner: UserId, now: DateTime<Utc>) -> Result<RunSession>;

    /// Fetch an active session by id, scoped to its owner; wrong id,
    /// wrong owner, and already-ended all surface as `SessionNotFound`
    async fn get_active(&self, owner: UserId, id: SessionId) -> Result<RunSession>;

    /// Persist the session's current state
    async fn save(&self, session: &RunSession) -> Result<()>;
}

/// Territory records with a geometric index and versioned writes
pub trait TerritoryStore {
    async fn insert(&self, territory: Territory) -> Result<()>;

    async fn get(&self, id: TerritoryId) -> Result<Option<Versioned<Territory>>>;

    /// Every stored territory whose polygon intersects `polygon`
    /// (edge-touching included). No ordering guarantee.
    async fn find_intersecting(&self, polygon: &GroundPolygon) -> Result<Vec<Versioned<Territory>>>;

    /// Write `territory` only if its stored version still equals
    /// `expected_version`. Returns false on conflict; the caller re-reads
    /// and re-assesses.
    async fn compare_and_swap(&self, expected_version: u64, territory: Territory) -> Result<bool>;
}
