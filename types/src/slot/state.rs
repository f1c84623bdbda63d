use super::{BetTier, MIN_LEVEL, STARTING_GOLD};

/// Authoritative game state for a single player session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub gold: u64,
    pub high_score: u64,
    pub level: u8,
    pub bet: BetTier,
    pub is_spinning: bool,
    pub total_spins: u64,
    pub total_wins: u64,
    pub biggest_win: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(STARTING_GOLD, BetTier::default())
    }
}

impl GameState {
    pub fn new(gold: u64, bet: BetTier) -> Self {
        Self {
            gold,
            high_score: 0,
            level: MIN_LEVEL,
            bet,
            is_spinning: false,
            total_spins: 0,
            total_wins: 0,
            biggest_win: 0,
        }
    }

    /// Whether a spin request would be accepted right now.
    pub fn can_spin(&self) -> bool {
        !self.is_spinning && self.gold >= self.bet.amount()
    }
}
