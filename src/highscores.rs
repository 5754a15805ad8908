//! High score leaderboard system
//!
//! One entry per player name holding that player's best score, sorted
//! highest first and capped at the top 10.

use serde::{Deserialize, Serialize};

use crate::platform::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub const STORAGE_KEY: &'static str = "karen_flyver_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary entries, restoring the leaderboard invariants
    pub fn from_entries(entries: impl IntoIterator<Item = HighScoreEntry>) -> Self {
        let mut scores = Self::new();
        for entry in entries {
            scores.merge(entry.name, entry.score);
        }
        scores.normalize();
        scores
    }

    /// Record a finished session's score under `name`
    ///
    /// Only raises an existing entry, never lowers it. Returns the player's
    /// 1-indexed rank afterwards, or `None` if they fell off the board.
    pub fn record_final_score(&mut self, name: &str, score: u64) -> Option<usize> {
        self.merge(name.to_string(), score);
        self.normalize();
        self.rank_of(name)
    }

    fn merge(&mut self, name: String, score: u64) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.score = existing.score.max(score),
            None => self.entries.push(HighScoreEntry { name, score }),
        }
    }

    /// Sort descending and truncate; stable so earlier holders win ties
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// 1-indexed rank of `name`, if on the board
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| i + 1)
    }

    /// Best `n` entries (the HUD shows 5)
    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse persisted JSON; anything unreadable yields an empty board
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<HighScoreEntry>>(json) {
            Ok(entries) => Self::from_entries(entries),
            Err(e) => {
                log::warn!("Discarding malformed high scores: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Load high scores from storage
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Some(json) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded {} high scores", scores.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores to storage; failures are logged, not returned
    pub fn save(&self, storage: &mut dyn Storage) {
        match storage.set_item(Self::STORAGE_KEY, &self.to_json()) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }
}
