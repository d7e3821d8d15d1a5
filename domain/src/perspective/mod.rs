//! Perspectives contributed by participants

pub mod entities;

pub use entities::{Perspective, PerspectiveRecord, Position, PositionTally};
