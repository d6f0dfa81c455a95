//! Player profile
//!
//! Just the name the leaderboard is keyed by, stored as a raw string.

use thiserror::Error;

use crate::consts::DEFAULT_PLAYER_NAME;
use crate::persistence::{KeyValueStore, keys};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("cannot change player during an innings")]
    InningsInProgress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerProfile {
    name: Option<String>,
}

impl PlayerProfile {
    /// Load the stored name, treating blank or unreadable values as absent
    pub fn load(store: &impl KeyValueStore) -> Self {
        let name = match store.get(keys::PLAYER_NAME) {
            Ok(name) => name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            Err(e) => {
                log::warn!("Player name unavailable: {}", e);
                None
            }
        };
        if let Some(name) = &name {
            log::info!("Welcome back, {}", name);
        }
        Self { name }
    }

    /// Validate and persist a new name. A failed write keeps the name for
    /// this session only.
    pub fn set_name(
        &mut self,
        store: &mut impl KeyValueStore,
        name: &str,
    ) -> Result<(), ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        self.name = Some(name.to_string());
        if let Err(e) = store.set(keys::PLAYER_NAME, name) {
            log::warn!("Player name not persisted: {}", e);
        }
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name scores are saved under
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PLAYER_NAME)
    }
}
