//! End-of-session statistics and leaderboard
//!
//! The leaderboard lives in memory only; hosts persist it if they want to.

use serde::{Deserialize, Serialize};

use crate::sim::{Character, Fixed};

/// Maximum number of leaderboard entries to keep
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// How one session went, in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    /// Height where the character ended up
    pub final_height: i32,
    /// Highest point reached
    pub peak_height: i32,
    /// Longest uninterrupted fall
    pub longest_fall: i32,
}

impl SessionStats {
    pub fn from_character(character: &Character) -> Self {
        let pixels = |v: Fixed| v.raw() >> Fixed::FRACTION_BITS;
        Self {
            final_height: pixels(-character.y),
            peak_height: pixels(-character.peak),
            longest_fall: pixels(character.max_fall),
        }
    }
}

/// Best sessions, ranked by peak height
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<SessionStats>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a session makes the board; never leaving the ground doesn't
    pub fn qualifies(&self, stats: &SessionStats) -> bool {
        if stats.peak_height <= 0 {
            return false;
        }
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        self.entries
            .last()
            .is_none_or(|e| stats.peak_height > e.peak_height)
    }

    /// Add a finished session, returning its rank (1-indexed) if it qualified
    pub fn record(&mut self, stats: SessionStats) -> Option<usize> {
        if !self.qualifies(&stats) {
            return None;
        }

        // Ties go after existing entries
        let pos = self
            .entries
            .iter()
            .position(|e| stats.peak_height > e.peak_height)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, stats);
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest peak on the board
    pub fn best(&self) -> Option<&SessionStats> {
        self.entries.first()
    }
}
