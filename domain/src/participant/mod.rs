//! Participants and the read-only catalog they come from

pub mod catalog;
pub mod entities;

pub use catalog::ParticipantCatalog;
pub use entities::Participant;
