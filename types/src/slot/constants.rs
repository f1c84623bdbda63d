/// Number of reels on the machine
pub const REELS: usize = 3;

/// Gold granted to a fresh player
pub const STARTING_GOLD: u64 = 1_000;

/// Bet selected for a fresh player
pub const STARTING_BET: u64 = 25;

/// Allowed wagers, ascending
pub const BET_TIERS: [u64; 5] = [10, 25, 50, 100, 250];

/// Reference bet that payouts are scaled against (a bet of 25 pays the
/// symbol value on a triple)
pub const BASELINE_BET: u64 = 25;

/// A double pays a tenth of the triple payout
pub const DOUBLE_PAYOUT_DIVISOR: u64 = 10;

/// First and last reachable level
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;

/// Gold required per level (level `n` requires `n * GOLD_PER_LEVEL`)
pub const GOLD_PER_LEVEL: u64 = 1_000;

/// Granted after a losing spin leaves the player unable to afford their bet
pub const LOSS_RECOVERY_BONUS: u64 = 100;

/// Below this balance a losing spin logs a hint to lower the bet
pub const LOW_GOLD_HINT: u64 = 100;

/// A single payout at or above this unlocks `big_win`
pub const BIG_WIN_THRESHOLD: u64 = 1_000;

/// Spin count that unlocks `spin_master`
pub const SPIN_MASTER_SPINS: u64 = 100;

/// Gold balance that unlocks `gold_hoarder`
pub const GOLD_HOARDER_THRESHOLD: u64 = 10_000;

/// Level that unlocks `level_5`
pub const SEASONED_LEVEL: u8 = 5;

/// Largest stored balance or counter accepted when loading saved progress
pub const MAX_STORED_VALUE: u64 = u64::MAX / 2;
