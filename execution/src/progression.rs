//! Gold, level and lifetime statistics bookkeeping.

use reelquest_types::slot::{
    GameState, WinResult, GOLD_PER_LEVEL, LOSS_RECOVERY_BONUS, LOW_GOLD_HINT, MAX_LEVEL,
};

/// Gold a player must hold to be at `level`.
pub fn gold_required(level: u8) -> u64 {
    level as u64 * GOLD_PER_LEVEL
}

/// Raise the level one step at a time while the balance qualifies.
///
/// Returns every level reached, in order. Must be called after each change
/// to `gold`.
pub fn apply_level_ups(state: &mut GameState) -> Vec<u8> {
    let mut reached = Vec::new();
    while state.level < MAX_LEVEL && state.gold >= gold_required(state.level + 1) {
        state.level += 1;
        reached.push(state.level);
    }
    reached
}

/// Take the bet for a new spin.
///
/// Returns the amount debited, or `None` (leaving the state untouched) if a
/// spin is already in flight or the bet is unaffordable.
pub fn debit(state: &mut GameState) -> Option<u64> {
    if !state.can_spin() {
        return None;
    }
    let bet = state.bet.amount();
    state.gold -= bet;
    state.total_spins = state.total_spins.saturating_add(1);
    state.is_spinning = true;
    Some(bet)
}

/// Effects of settling a spin on the player's progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Gold credited by the win
    pub credited: u64,
    /// Loss recovery bonus granted
    pub bonus: u64,
    /// The balance dropped under the low gold hint threshold on a loss
    pub low_gold: bool,
    /// Levels reached, in order
    pub levels: Vec<u8>,
}

/// Credit a win (or handle a loss) and update statistics.
pub fn settle(state: &mut GameState, win: &WinResult) -> Settlement {
    let mut settlement = Settlement::default();

    if win.is_win() {
        state.gold = state.gold.saturating_add(win.amount);
        state.total_wins = state.total_wins.saturating_add(1);
        state.biggest_win = state.biggest_win.max(win.amount);
        settlement.credited = win.amount;
    } else {
        settlement.low_gold = state.gold < LOW_GOLD_HINT;
        if state.gold < state.bet.amount() {
            state.gold = state.gold.saturating_add(LOSS_RECOVERY_BONUS);
            settlement.bonus = LOSS_RECOVERY_BONUS;
        }
    }

    state.high_score = state.high_score.max(state.gold);
    settlement.levels = apply_level_ups(state);
    settlement
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelquest_types::slot::{BetTier, SymbolId, WinKind};

    fn state(gold: u64, bet: u64) -> GameState {
        GameState::new(gold, BetTier::try_from(bet).unwrap())
    }

    fn win(amount: u64) -> WinResult {
        WinResult {
            kind: WinKind::Triple,
            symbol: Some(*SymbolId::Blade.symbol()),
            amount,
            combo: "🗡️🗡️🗡️".to_string(),
        }
    }

    #[test]
    fn test_level_thresholds() {
        let mut below = state(4_999, 25);
        below.level = 4;
        assert!(apply_level_ups(&mut below).is_empty());
        assert_eq!(below.level, 4);

        let mut exact = state(5_000, 25);
        exact.level = 4;
        assert_eq!(apply_level_ups(&mut exact), vec![5]);
        assert_eq!(exact.level, 5);
    }

    #[test]
    fn test_level_steps_one_at_a_time() {
        let mut rich = state(7_500, 25);
        assert_eq!(apply_level_ups(&mut rich), vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(rich.level, 7);
    }

    #[test]
    fn test_level_caps_at_max() {
        let mut whale = state(1_000_000, 25);
        let reached = apply_level_ups(&mut whale);
        assert_eq!(reached.last(), Some(&MAX_LEVEL));
        assert_eq!(whale.level, MAX_LEVEL);
        assert!(apply_level_ups(&mut whale).is_empty());
    }

    #[test]
    fn test_debit() {
        let mut s = state(100, 25);
        assert_eq!(debit(&mut s), Some(25));
        assert_eq!(s.gold, 75);
        assert_eq!(s.total_spins, 1);
        assert!(s.is_spinning);

        // Already spinning
        assert_eq!(debit(&mut s), None);
        assert_eq!(s.gold, 75);
        assert_eq!(s.total_spins, 1);
    }

    #[test]
    fn test_debit_requires_funds() {
        let mut s = state(24, 25);
        assert_eq!(debit(&mut s), None);
        assert_eq!(s.gold, 24);
        assert!(!s.is_spinning);
        assert_eq!(s.total_spins, 0);
    }

    #[test]
    fn test_settle_win() {
        let mut s = state(975, 25);
        s.total_spins = 1;
        let settlement = settle(&mut s, &win(250));
        assert_eq!(settlement.credited, 250);
        assert_eq!(settlement.bonus, 0);
        assert_eq!(s.gold, 1_225);
        assert_eq!(s.total_wins, 1);
        assert_eq!(s.biggest_win, 250);
        assert_eq!(s.high_score, 1_225);

        // Running maxima never decrease
        settle(&mut s, &win(10));
        assert_eq!(s.biggest_win, 250);
        settle(&mut s, &WinResult::loss());
        assert_eq!(s.high_score, 1_235);
    }

    #[test]
    fn test_loss_recovery() {
        // Gold left after the debit is below the bet
        let mut s = state(5, 10);
        let settlement = settle(&mut s, &WinResult::loss());
        assert_eq!(settlement.bonus, LOSS_RECOVERY_BONUS);
        assert!(settlement.low_gold);
        assert_eq!(s.gold, 105);
        assert_eq!(s.total_wins, 0);
    }

    #[test]
    fn test_no_recovery_when_affordable() {
        let mut s = state(50, 50);
        let settlement = settle(&mut s, &WinResult::loss());
        assert_eq!(settlement.bonus, 0);
        assert!(settlement.low_gold);
        assert_eq!(s.gold, 50);

        let mut comfortable = state(500, 50);
        assert!(!settle(&mut comfortable, &WinResult::loss()).low_gold);
    }

    #[test]
    fn test_settle_levels_up() {
        let mut s = state(1_990, 10);
        let settlement = settle(&mut s, &win(10));
        assert_eq!(settlement.levels, vec![2]);
        assert_eq!(s.level, 2);
    }

    #[test]
    fn test_counters_saturate() {
        let mut s = state(u64::MAX, 25);
        s.total_spins = u64::MAX;
        s.total_wins = u64::MAX;
        assert_eq!(debit(&mut s), Some(25));
        assert_eq!(s.total_spins, u64::MAX);

        settle(&mut s, &win(1_000));
        assert_eq!(s.gold, u64::MAX);
        assert_eq!(s.total_wins, u64::MAX);
        assert_eq!(s.high_score, u64::MAX);
        assert_eq!(s.level, MAX_LEVEL);
    }
}
