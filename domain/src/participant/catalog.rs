//! Read-only participant directory
//!
//! The catalog is built once by its owner (a file loader, a test, a CLI
//! snapshot) and handed to the core by reference. Refresh policy lives
//! entirely with the owner; nothing here caches globally or reloads.

use super::entities::Participant;
use serde::{Deserialize, Serialize};

/// Case-insensitive name/role keyed directory of participants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantCatalog {
    participants: Vec<Participant>,
}

impl ParticipantCatalog {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    /// Look up by exact name first, then by role (both case-insensitive)
    pub fn get(&self, key: &str) -> Option<&Participant> {
        self.by_name(key).or_else(|| self.by_role(key))
    }

    pub fn by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_named(name))
    }

    pub fn by_role(&self, role: &str) -> Option<&Participant> {
        let role = role.trim().to_lowercase();
        self.participants
            .iter()
            .find(|p| p.role.trim().to_lowercase() == role)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl FromIterator<Participant> for ParticipantCatalog {
    fn from_iter<T: IntoIterator<Item = Participant>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
