use reelquest_types::slot::{BetTier, REELS, STARTING_GOLD};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for a game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Balance of a player with no saved progress
    pub starting_gold: u64,
    /// Bet selected at startup
    pub starting_bet: BetTier,
    /// When the first reel stops, in milliseconds
    pub reel_stop_ms: u64,
    /// Extra delay before each following reel stops, in milliseconds
    pub reel_stagger_ms: u64,
    /// Delay between accepting a spin and settling it, in milliseconds
    pub settle_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_gold: STARTING_GOLD,
            starting_bet: BetTier::default(),
            reel_stop_ms: 1_500,
            reel_stagger_ms: 200,
            settle_delay_ms: 2_000,
        }
    }
}

impl GameConfig {
    /// Stop time of each reel, left to right.
    pub fn reel_stops(&self) -> [Duration; REELS] {
        std::array::from_fn(|reel| {
            Duration::from_millis(self.reel_stop_ms + reel as u64 * self.reel_stagger_ms)
        })
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
