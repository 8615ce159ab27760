//! The lifecycle engine: per-session state transitions and the interrupt
//! timeout race.
//!
//! Sessions move along `Created → Activated → Interrupted → Finished`, plus
//! the re-entrant edge `Interrupted → Activated`. Interrupting starts a
//! finalize timer racing a single-use reactivation signal; whichever fires
//! first wins and the loser is inert. All transitions on one session,
//! including the timer's, serialize through the session's own lock, so state
//! never interleaves inconsistently.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::error::StreamlineError;
use crate::models::{Translation, TranslationKind, TranslationState};

/// A live tracked translation session.
///
/// Identity fields are immutable after construction. The mutable lifecycle
/// state sits behind one `Mutex` that lives as long as the session does;
/// handlers, the service, and the finalize timer all go through it.
#[derive(Debug)]
pub struct TrackedTranslation {
    pub id: Uuid,
    pub kind: TranslationKind,
    pub created_at: DateTime<Utc>,
    cell: Mutex<LifecycleCell>,
}

/// The mutable half of a session, guarded by the per-session lock.
///
/// `reactivate` is `Some` exactly while the session is `Interrupted`: each
/// interruption episode gets a fresh single-permit [`Notify`], so a signal
/// can never leak from one episode into a later one.
#[derive(Debug)]
struct LifecycleCell {
    state: TranslationState,
    reactivate: Option<Arc<Notify>>,
}

impl TrackedTranslation {
    /// Construct a new session in `Created` with a fresh v4 ID.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: TranslationKind::Stream,
            created_at: Utc::now(),
            cell: Mutex::new(LifecycleCell {
                state: TranslationState::Created,
                reactivate: None,
            }),
        }
    }

    /// Current state, read under the session lock.
    pub fn state(&self) -> TranslationState {
        self.cell.lock().expect("lifecycle lock poisoned").state
    }

    /// Serializable snapshot of the session as of this instant.
    pub fn snapshot(&self) -> Translation {
        Translation {
            id: self.id,
            kind: self.kind,
            state: self.state(),
            created_at: self.created_at,
        }
    }

    /// Apply the `activate` transition.
    ///
    /// From `Created` this starts the session; from `Interrupted` it
    /// reactivates, consuming the episode's signal slot so the pending
    /// finalize timer stops without firing. Activating an already `Activated`
    /// session is a no-op success.
    pub fn activate(&self) -> Result<(), StreamlineError> {
        let mut cell = self.cell.lock().expect("lifecycle lock poisoned");
        match cell.state {
            TranslationState::Created | TranslationState::Activated => {
                cell.state = TranslationState::Activated;
                Ok(())
            }
            TranslationState::Interrupted => {
                cell.state = TranslationState::Activated;
                // The state flip and the signal happen under the same lock
                // hold, so the timer either sees `Activated` when it wakes or
                // consumes the permit and never finalizes.
                if let Some(signal) = cell.reactivate.take() {
                    signal.notify_one();
                }
                Ok(())
            }
            TranslationState::Finished => Err(StreamlineError::AlreadyFinished(self.id)),
        }
    }

    /// Apply the `interrupt` transition and start the finalize timer.
    ///
    /// The timer runs as a detached task racing the timeout against this
    /// episode's reactivation signal; the lock is released before the task is
    /// spawned and the call returns without waiting on it. Interrupting an
    /// already `Interrupted` session is rejected rather than resetting the
    /// timer, so at most one timer is ever pending per session.
    pub fn interrupt(self: Arc<Self>, timeout: Duration) -> Result<(), StreamlineError> {
        let signal = {
            let mut cell = self.cell.lock().expect("lifecycle lock poisoned");
            match cell.state {
                TranslationState::Created => {
                    return Err(StreamlineError::NotYetActivated(self.id))
                }
                TranslationState::Interrupted => {
                    return Err(StreamlineError::AlreadyInterrupted(self.id))
                }
                TranslationState::Finished => {
                    return Err(StreamlineError::AlreadyFinished(self.id))
                }
                TranslationState::Activated => {
                    cell.state = TranslationState::Interrupted;
                    let signal = Arc::new(Notify::new());
                    cell.reactivate = Some(Arc::clone(&signal));
                    signal
                }
            }
        };

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => self.finalize(),
                _ = signal.notified() => {}
            }
        });

        Ok(())
    }

    /// Timer-driven `Interrupted → Finished` transition.
    ///
    /// Has no caller to report to: it re-checks the state under the lock and
    /// does nothing if a reactivation won the race first.
    fn finalize(&self) {
        let mut cell = self.cell.lock().expect("lifecycle lock poisoned");
        if cell.state == TranslationState::Interrupted {
            cell.state = TranslationState::Finished;
            cell.reactivate = None;
            tracing::debug!(id = %self.id, "translation finalized after interrupt timeout");
        }
    }

    /// Stop a pending finalize timer without transitioning.
    ///
    /// Used when the session leaves the registry while `Interrupted`: the
    /// timer wakes on the signal and exits, and the removed session is never
    /// mutated again.
    pub fn cancel_pending_timer(&self) {
        let mut cell = self.cell.lock().expect("lifecycle lock poisoned");
        if let Some(signal) = cell.reactivate.take() {
            signal.notify_one();
        }
    }
}

impl Default for TrackedTranslation {
    fn default() -> Self {
        Self::new()
    }
}
