use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the registry, lifecycle engine, and service.
///
/// All of these are returned synchronously to the caller of the violating
/// operation; none are retried. The timer-driven finalize transition has no
/// caller and is infallible by construction, so it has no variant here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamlineError {
    #[error("no translation with id {0}")]
    NotFound(Uuid),

    /// Internal invariant violation: v4 ID generation should make this
    /// unreachable. Surfaced as an internal error, never as user input.
    #[error("translation id {0} already registered")]
    DuplicateId(Uuid),

    #[error("translation {0} is already finished")]
    AlreadyFinished(Uuid),

    #[error("translation {0} has not been activated yet")]
    NotYetActivated(Uuid),

    #[error("translation {0} is already interrupted")]
    AlreadyInterrupted(Uuid),
}
