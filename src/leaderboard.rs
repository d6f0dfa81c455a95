//! Player leaderboard
//!
//! One entry per player name holding their best score. Persisted as a JSON
//! array of `{ name, score }` objects, sorted best first.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError, keys};

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// Best score per player, sorted descending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary entries (sorted on the way in)
    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        let mut board = Self { entries };
        board.sort();
        board
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Record a finished innings.
    ///
    /// A known player's score is only replaced by a strictly greater one; an
    /// unknown player is inserted. The collection is resorted either way.
    /// Returns true if anything changed.
    pub fn save_score(&mut self, name: &str, score: u32) -> bool {
        let changed = match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) if score > entry.score => {
                entry.score = score;
                true
            }
            Some(_) => false,
            None => {
                self.entries.push(LeaderboardEntry {
                    name: name.to_string(),
                    score,
                });
                true
            }
        };
        self.sort();
        changed
    }

    /// Stable descending sort so ties keep their insertion order
    fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    /// Best recorded score for a player
    pub fn best_for(&self, name: &str) -> Option<u32> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    /// 1-indexed position of a player
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name).map(|i| i + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from storage; missing or malformed data yields an empty board
    pub fn load(store: &impl KeyValueStore) -> Self {
        let json = match store.get(keys::LEADERBOARD) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No leaderboard found, starting fresh");
                return Self::new();
            }
            Err(e) => {
                log::warn!("Leaderboard unavailable: {}", e);
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&json) {
            Ok(entries) => {
                log::info!("Loaded {} leaderboard entries", entries.len());
                Self::from_entries(entries)
            }
            Err(e) => {
                log::warn!("Discarding malformed leaderboard: {}", e);
                Self::new()
            }
        }
    }

    /// Write the whole collection to storage
    pub fn persist(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self).map_err(|e| StorageError::Write {
            key: keys::LEADERBOARD.to_string(),
            message: e.to_string(),
        })?;
        store.set(keys::LEADERBOARD, &json)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// `save_score` followed by `persist`
    pub fn record(
        &mut self,
        store: &mut impl KeyValueStore,
        name: &str,
        score: u32,
    ) -> Result<bool, StorageError> {
        let changed = self.save_score(name, score);
        self.persist(store)?;
        Ok(changed)
    }
}
