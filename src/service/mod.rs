//! The translation service: registry + lifecycle engine behind one surface.
//!
//! Each operation looks the session up in the registry, applies the lifecycle
//! transition, and returns a fresh snapshot. The service holds no state of
//! its own beyond the registry handle, and no registry or session lock is
//! held across the timer scheduling inside `interrupt`.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::error::StreamlineError;
use crate::lifecycle::TrackedTranslation;
use crate::models::Translation;
use crate::registry::Registry;

/// Externally callable operations over tracked translation sessions.
///
/// Cheap to clone; every clone shares the same registry. This is what the
/// HTTP layer carries as axum state.
#[derive(Debug, Clone)]
pub struct TranslationService {
    registry: Arc<Registry>,
}

impl TranslationService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Register a new session in `Created` and return its snapshot.
    pub fn create(&self) -> Result<Translation, StreamlineError> {
        let session = Arc::new(TrackedTranslation::new());
        let snapshot = session.snapshot();
        self.registry.insert(session)?;
        Ok(snapshot)
    }

    pub fn get(&self, id: Uuid) -> Result<Translation, StreamlineError> {
        Ok(self.registry.get(id)?.snapshot())
    }

    /// Remove a session. A finalize timer still pending on it is stopped so
    /// the session is never mutated after it leaves the registry.
    pub fn delete(&self, id: Uuid) -> Result<(), StreamlineError> {
        let session = self.registry.remove(id)?;
        session.cancel_pending_timer();
        Ok(())
    }

    /// Activate a session (idempotent on `Activated`, cancels the finalize
    /// timer when applied to `Interrupted`).
    pub fn activate(&self, id: Uuid) -> Result<Translation, StreamlineError> {
        let session = self.registry.get(id)?;
        session.activate()?;
        Ok(session.snapshot())
    }

    /// Interrupt a session, arming the finalize timer for `timeout`.
    ///
    /// Returns as soon as the timer is scheduled; the `Interrupted → Finished`
    /// transition, if it happens, is observed by re-reading the session.
    pub fn interrupt(&self, id: Uuid, timeout: Duration) -> Result<Translation, StreamlineError> {
        let session = self.registry.get(id)?;
        Arc::clone(&session).interrupt(timeout)?;
        Ok(session.snapshot())
    }

    /// Snapshots of all live sessions. Order is not guaranteed.
    pub fn list(&self) -> Vec<Translation> {
        self.registry
            .list()
            .iter()
            .map(|session| session.snapshot())
            .collect()
    }
}
