//! Deliberation snapshots
//!
//! A snapshot is the JSON document the collection process leaves behind:
//! the proposal, the participant catalog, the perspective records and the
//! optional advocate history.

mod loader;

pub use loader::{DeliberationSnapshot, JsonSnapshotLoader, SnapshotError};
