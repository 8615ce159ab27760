//! The registry of live translation sessions.
//!
//! One process-wide keyed store behind a single `RwLock`, constructed once at
//! startup and shared by handle. Mutations of the key space serialize against
//! each other and against reads, so a lookup never observes a half-inserted
//! or half-removed session.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::error::StreamlineError;
use crate::lifecycle::TrackedTranslation;

/// Concurrent-safe keyed store of all live sessions.
///
/// The registry exclusively owns the session set; everything else holds
/// `Arc` handles to individual sessions. Per-session mutation goes through
/// the session's own lock, not this one, so stalled work on one session
/// never blocks unrelated sessions.
#[derive(Debug, Default)]
pub struct Registry {
    sessions: RwLock<HashMap<Uuid, Arc<TrackedTranslation>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session under its ID.
    ///
    /// `DuplicateId` is an internal invariant violation: v4 generation makes
    /// collisions unreachable, but the key space is checked regardless.
    pub fn insert(&self, session: Arc<TrackedTranslation>) -> Result<(), StreamlineError> {
        let mut sessions = self.sessions.write().expect("registry lock poisoned");
        if sessions.contains_key(&session.id) {
            return Err(StreamlineError::DuplicateId(session.id));
        }
        sessions.insert(session.id, session);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<TrackedTranslation>, StreamlineError> {
        let sessions = self.sessions.read().expect("registry lock poisoned");
        sessions
            .get(&id)
            .cloned()
            .ok_or(StreamlineError::NotFound(id))
    }

    /// Remove a session, returning it so the caller can cancel a pending
    /// finalize timer before the last reachable handle is dropped.
    pub fn remove(&self, id: Uuid) -> Result<Arc<TrackedTranslation>, StreamlineError> {
        let mut sessions = self.sessions.write().expect("registry lock poisoned");
        sessions.remove(&id).ok_or(StreamlineError::NotFound(id))
    }

    /// Snapshot of all live sessions. Iteration order is not guaranteed.
    pub fn list(&self) -> Vec<Arc<TrackedTranslation>> {
        let sessions = self.sessions.read().expect("registry lock poisoned");
        sessions.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Seed the registry with `count` fresh sessions in `Created`.
    ///
    /// Demo/test data for local runs, registered the same way `create` does.
    pub fn seed(&self, count: usize) -> Result<(), StreamlineError> {
        for _ in 0..count {
            self.insert(Arc::new(TrackedTranslation::new()))?;
        }
        Ok(())
    }
}
