use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point-in-time snapshot of one tracked translation session.
///
/// Snapshots are what the API serves: the state is read under the entity's
/// lock at snapshot time and may be finalized by the timeout timer the moment
/// after. Clients learn of timer-driven transitions by re-reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub id: Uuid,
    pub kind: TranslationKind,
    pub state: TranslationState,
    pub created_at: DateTime<Utc>,
}

/// Classification of a translation session.
///
/// Only live-stream sessions exist today; the tag is fixed at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TranslationKind {
    Stream,
}

impl TranslationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stream => "stream",
        }
    }
}

/// The lifecycle state of a translation session.
///
/// - `Created`: registered, not yet streaming
/// - `Activated`: streaming
/// - `Interrupted`: paused, racing a finalize timeout against reactivation
/// - `Finished`: terminal; the session can only be listed or deleted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TranslationState {
    Created,
    Activated,
    Interrupted,
    Finished,
}

impl TranslationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Activated => "activated",
            Self::Interrupted => "interrupted",
            Self::Finished => "finished",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "created" => Some(Self::Created),
            "activated" => Some(Self::Activated),
            "interrupted" => Some(Self::Interrupted),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }
}
