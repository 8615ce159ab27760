//! Domain models for streamline.
//!
//! A [`Translation`] is the serializable view of one tracked translation
//! session: identity, classification, lifecycle state, and creation time.
//! The live entity behind it (with its lock and reactivation signal) lives in
//! [`crate::lifecycle`]; only the fields here ever cross the wire.

mod translation;

pub use translation::*;
