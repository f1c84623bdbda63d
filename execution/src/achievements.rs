//! Achievement unlock rules.
//!
//! Rules are evaluated against discrete game events rather than polled.
//! Unlocking is idempotent: a satisfied rule for an already unlocked
//! achievement does nothing.

use reelquest_types::slot::{
    most_valuable, Achievement, AchievementBook, AchievementId, BetTier, WinKind, WinResult,
    BIG_WIN_THRESHOLD, GOLD_HOARDER_THRESHOLD, SEASONED_LEVEL, SPIN_MASTER_SPINS, SYMBOLS,
};
use tracing::info;

/// Game events achievements react to.
#[derive(Clone, Copy, Debug)]
pub enum Trigger<'a> {
    /// A spin was accepted and its bet taken.
    SpinStarted { total_spins: u64, bet: BetTier },
    /// The player picked a bet.
    BetSelected(BetTier),
    /// A spin finished settling.
    Settled {
        win: &'a WinResult,
        total_wins: u64,
        gold: u64,
    },
    /// The player reached a new level.
    LevelReached(u8),
}

/// Achievements whose conditions hold for a trigger.
fn satisfied(trigger: &Trigger<'_>) -> Vec<AchievementId> {
    let mut ids = Vec::new();
    match *trigger {
        Trigger::SpinStarted { total_spins, bet } => {
            if total_spins >= 1 {
                ids.push(AchievementId::FirstSpin);
            }
            if total_spins >= SPIN_MASTER_SPINS {
                ids.push(AchievementId::SpinMaster);
            }
            if bet.is_max() {
                ids.push(AchievementId::HighRoller);
            }
        }
        Trigger::BetSelected(bet) => {
            if bet.is_max() {
                ids.push(AchievementId::HighRoller);
            }
        }
        Trigger::Settled {
            win,
            total_wins,
            gold,
        } => {
            if win.is_win() {
                if total_wins >= 1 {
                    ids.push(AchievementId::FirstWin);
                }
                if win.amount >= BIG_WIN_THRESHOLD {
                    ids.push(AchievementId::BigWin);
                }
                let jackpot = most_valuable(&SYMBOLS).map(|s| s.id);
                if win.kind == WinKind::Triple && win.symbol.map(|s| s.id) == jackpot {
                    ids.push(AchievementId::TripleDragon);
                }
            }
            if gold >= GOLD_HOARDER_THRESHOLD {
                ids.push(AchievementId::GoldHoarder);
            }
        }
        Trigger::LevelReached(level) => {
            if level == SEASONED_LEVEL {
                ids.push(AchievementId::Level5);
            }
        }
    }
    ids
}

/// Apply a trigger to the book, returning newly unlocked achievements.
pub fn evaluate(book: &mut AchievementBook, trigger: Trigger<'_>) -> Vec<Achievement> {
    satisfied(&trigger)
        .into_iter()
        .filter_map(|id| book.unlock(id))
        .inspect(|achievement| info!(id = %achievement.id, "achievement unlocked"))
        .collect()
}
