//! Snapshot storage on top of a string-valued key-value store.
//!
//! Numeric fields are stored as decimal strings. Achievement flags and
//! lifetime statistics are stored as JSON objects. Loading is tolerant: a
//! missing or malformed field falls back to its default instead of failing
//! the whole load.
//!
//! All operations are skipped unless a signed-in session is attached.

use reelquest_types::slot::{
    AchievementId, PersistedSnapshot, Stats, MAX_LEVEL, MAX_STORED_VALUE, MIN_LEVEL,
};
use std::{collections::BTreeMap, str::FromStr};
use tracing::{debug, warn};

use crate::store::{KeyValueStore, StoreError};

pub const GOLD_KEY: &str = "fantasy_slot_gold";
pub const HIGH_SCORE_KEY: &str = "fantasy_slot_high_score";
pub const LEVEL_KEY: &str = "fantasy_slot_level";
pub const ACHIEVEMENTS_KEY: &str = "fantasy_slot_achievements";
pub const STATS_KEY: &str = "fantasy_slot_stats";

fn parse_number<T: FromStr>(key: &str, raw: Option<&str>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, raw, "malformed stored number, using default");
            default
        }
    }
}

fn parse_amount(key: &str, raw: Option<&str>, default: u64) -> u64 {
    let amount = parse_number(key, raw, default);
    if amount > MAX_STORED_VALUE {
        warn!(key, amount, "stored amount out of range, using default");
        return default;
    }
    amount
}

fn parse_level(raw: Option<&str>) -> u8 {
    let level = parse_number(LEVEL_KEY, raw, MIN_LEVEL);
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        level
    } else {
        warn!(level, "stored level out of range, using default");
        MIN_LEVEL
    }
}

/// Every known achievement, unlocked only where the stored flag is `true`.
/// Unknown ids are ignored.
fn parse_achievements(raw: Option<&str>) -> BTreeMap<AchievementId, bool> {
    let mut flags: BTreeMap<AchievementId, bool> =
        AchievementId::ALL.into_iter().map(|id| (id, false)).collect();
    let Some(raw) = raw else {
        return flags;
    };
    match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(raw) {
        Ok(stored) => {
            for (key, value) in stored {
                match AchievementId::parse(&key) {
                    Some(id) => {
                        flags.insert(id, value == serde_json::Value::Bool(true));
                    }
                    None => debug!(key, "ignoring unknown achievement"),
                }
            }
        }
        Err(e) => warn!(error = %e, "malformed stored achievements, ignoring"),
    }
    flags
}

fn parse_stats(raw: Option<&str>) -> Stats {
    let Some(raw) = raw else {
        return Stats::default();
    };
    let stats: Stats = match serde_json::from_str(raw) {
        Ok(stats) => stats,
        Err(e) => {
            warn!(error = %e, "malformed stored stats, ignoring");
            return Stats::default();
        }
    };
    let in_range = [stats.total_spins, stats.total_wins, stats.biggest_win]
        .iter()
        .all(|&value| value <= MAX_STORED_VALUE);
    if !in_range || stats.total_wins > stats.total_spins {
        warn!(?stats, "inconsistent stored stats, ignoring");
        return Stats::default();
    }
    stats
}

/// Reads and writes [PersistedSnapshot]s for the signed-in player.
pub struct Gateway<S: KeyValueStore> {
    store: S,
    attached: bool,
}

impl<S: KeyValueStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            attached: false,
        }
    }

    /// Enable persistence for a signed-in session.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Disable persistence after sign-out.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Load the stored snapshot.
    ///
    /// Returns `None` when detached or when nothing has been stored yet.
    pub async fn load(&self) -> Result<Option<PersistedSnapshot>, StoreError> {
        if !self.attached {
            return Ok(None);
        }

        let gold = self.store.get(GOLD_KEY).await?;
        let high_score = self.store.get(HIGH_SCORE_KEY).await?;
        let level = self.store.get(LEVEL_KEY).await?;
        let achievements = self.store.get(ACHIEVEMENTS_KEY).await?;
        let stats = self.store.get(STATS_KEY).await?;

        if gold.is_none()
            && high_score.is_none()
            && level.is_none()
            && achievements.is_none()
            && stats.is_none()
        {
            return Ok(None);
        }

        let defaults = PersistedSnapshot::default();
        Ok(Some(PersistedSnapshot {
            gold: parse_amount(GOLD_KEY, gold.as_deref(), defaults.gold),
            high_score: parse_amount(HIGH_SCORE_KEY, high_score.as_deref(), defaults.high_score),
            level: parse_level(level.as_deref()),
            achievements: parse_achievements(achievements.as_deref()),
            stats: parse_stats(stats.as_deref()),
        }))
    }

    /// Overwrite the stored snapshot. Does nothing when detached.
    pub async fn save(&mut self, snapshot: &PersistedSnapshot) -> Result<(), StoreError> {
        if !self.attached {
            return Ok(());
        }

        let achievements: BTreeMap<&str, bool> = snapshot
            .achievements
            .iter()
            .map(|(id, unlocked)| (id.as_str(), *unlocked))
            .collect();
        let achievements = serde_json::to_string(&achievements)?;
        let stats = serde_json::to_string(&snapshot.stats)?;

        self.store.set(GOLD_KEY, snapshot.gold.to_string()).await?;
        self.store
            .set(HIGH_SCORE_KEY, snapshot.high_score.to_string())
            .await?;
        self.store.set(LEVEL_KEY, snapshot.level.to_string()).await?;
        self.store.set(ACHIEVEMENTS_KEY, achievements).await?;
        self.store.set(STATS_KEY, stats).await?;
        debug!(gold = snapshot.gold, level = snapshot.level, "snapshot saved");
        Ok(())
    }
}
