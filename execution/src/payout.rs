//! Win classification and payout scaling.
//!
//! Payouts scale linearly with the bet against a reference bet of 25:
//! - three of a kind pays `value * bet / 25`
//! - exactly two of a kind pays a tenth of that
//!
//! Both are floored. Arithmetic is done in integers, so a double is
//! `value * bet / 250` rather than a rounded float product.

use reelquest_types::slot::{
    BetTier, SpinOutcome, Symbol, WinKind, WinResult, BASELINE_BET, DOUBLE_PAYOUT_DIVISOR,
};

/// Triple payout for a symbol at a given bet.
pub fn triple_payout(symbol: &Symbol, bet: BetTier) -> u64 {
    symbol.value * bet.amount() / BASELINE_BET
}

/// Double payout for a symbol at a given bet.
pub fn double_payout(symbol: &Symbol, bet: BetTier) -> u64 {
    symbol.value * bet.amount() / (BASELINE_BET * DOUBLE_PAYOUT_DIVISOR)
}

/// Find the matching symbol, if any.
///
/// Every reel equal is a triple. Otherwise the first symbol (in reel order)
/// that appears exactly twice is a double. With three reels at most one pair
/// can exist.
fn classify(reels: &[Symbol]) -> (WinKind, Option<Symbol>) {
    let Some(first) = reels.first() else {
        return (WinKind::None, None);
    };
    if reels.iter().all(|s| s.id == first.id) {
        return (WinKind::Triple, Some(*first));
    }
    let pair = reels
        .iter()
        .find(|s| reels.iter().filter(|other| other.id == s.id).count() == 2);
    match pair {
        Some(symbol) => (WinKind::Double, Some(*symbol)),
        None => (WinKind::None, None),
    }
}

/// Settle an outcome against the bet that produced it.
pub fn evaluate(outcome: &SpinOutcome, bet: BetTier) -> WinResult {
    match classify(&outcome.reels) {
        (WinKind::Triple, Some(symbol)) => WinResult {
            kind: WinKind::Triple,
            symbol: Some(symbol),
            amount: triple_payout(&symbol, bet),
            combo: symbol.emoji.repeat(3),
        },
        (WinKind::Double, Some(symbol)) => WinResult {
            kind: WinKind::Double,
            symbol: Some(symbol),
            amount: double_payout(&symbol, bet),
            combo: symbol.emoji.repeat(2),
        },
        _ => WinResult::loss(),
    }
}
