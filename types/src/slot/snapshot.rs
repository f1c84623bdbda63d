use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AchievementBook, AchievementId, GameState, MIN_LEVEL, STARTING_GOLD};

/// Lifetime counters, stored together as one JSON blob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub total_spins: u64,
    pub total_wins: u64,
    pub biggest_win: u64,
}

/// The persisted subset of game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistedSnapshot {
    pub gold: u64,
    pub high_score: u64,
    pub level: u8,
    pub achievements: BTreeMap<AchievementId, bool>,
    pub stats: Stats,
}

impl Default for PersistedSnapshot {
    fn default() -> Self {
        Self {
            gold: STARTING_GOLD,
            high_score: 0,
            level: MIN_LEVEL,
            achievements: BTreeMap::new(),
            stats: Stats::default(),
        }
    }
}

impl PersistedSnapshot {
    pub fn capture(state: &GameState, achievements: &AchievementBook) -> Self {
        Self {
            gold: state.gold,
            high_score: state.high_score,
            level: state.level,
            achievements: achievements.to_map(),
            stats: Stats {
                total_spins: state.total_spins,
                total_wins: state.total_wins,
                biggest_win: state.biggest_win,
            },
        }
    }

    /// Overwrite the persisted fields of `state` and merge unlock flags into
    /// `achievements`. The selected bet and spin flag are left alone.
    pub fn restore(&self, state: &mut GameState, achievements: &mut AchievementBook) {
        state.gold = self.gold;
        state.high_score = self.high_score;
        state.level = self.level;
        state.total_spins = self.stats.total_spins;
        state.total_wins = self.stats.total_wins;
        state.biggest_win = self.stats.biggest_win;
        achievements.merge(&self.achievements);
    }
}
