use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Achievement identifiers. The snake_case form is the persisted key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AchievementId {
    FirstSpin = 0,
    FirstWin = 1,
    BigWin = 2,
    #[serde(rename = "level_5")]
    Level5 = 3,
    HighRoller = 4,
    TripleDragon = 5,
    SpinMaster = 6,
    GoldHoarder = 7,
}

impl AchievementId {
    pub const ALL: [AchievementId; 8] = [
        AchievementId::FirstSpin,
        AchievementId::FirstWin,
        AchievementId::BigWin,
        AchievementId::Level5,
        AchievementId::HighRoller,
        AchievementId::TripleDragon,
        AchievementId::SpinMaster,
        AchievementId::GoldHoarder,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AchievementId::FirstSpin => "first_spin",
            AchievementId::FirstWin => "first_win",
            AchievementId::BigWin => "big_win",
            AchievementId::Level5 => "level_5",
            AchievementId::HighRoller => "high_roller",
            AchievementId::TripleDragon => "triple_dragon",
            AchievementId::SpinMaster => "spin_master",
            AchievementId::GoldHoarder => "gold_hoarder",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == key)
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An achievement and whether the player has earned it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
}

const fn locked(
    id: AchievementId,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
) -> Achievement {
    Achievement {
        id,
        name,
        description,
        icon,
        unlocked: false,
    }
}

/// The fixed achievement catalog, indexed by `AchievementId`.
pub const ACHIEVEMENTS: [Achievement; 8] = [
    locked(
        AchievementId::FirstSpin,
        "First Adventure",
        "Spin the reels for the first time",
        "🎰",
    ),
    locked(
        AchievementId::FirstWin,
        "Lucky Beginner",
        "Win your first spin",
        "🍀",
    ),
    locked(
        AchievementId::BigWin,
        "Dragon Slayer",
        "Win 1000+ gold in a single spin",
        "🐉",
    ),
    locked(
        AchievementId::Level5,
        "Seasoned Adventurer",
        "Reach level 5",
        "⚔️",
    ),
    locked(
        AchievementId::HighRoller,
        "High Roller",
        "Bet 250 gold in a single spin",
        "💰",
    ),
    locked(
        AchievementId::TripleDragon,
        "Dragon Master",
        "Get three dragons in a row",
        "🐲",
    ),
    locked(
        AchievementId::SpinMaster,
        "Spin Master",
        "Complete 100 spins",
        "🎯",
    ),
    locked(
        AchievementId::GoldHoarder,
        "Gold Hoarder",
        "Accumulate 10,000 gold",
        "💎",
    ),
];

/// The player's achievement progress.
///
/// Only the `unlocked` flags change, and only from `false` to `true`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementBook {
    entries: [Achievement; 8],
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self {
            entries: ACHIEVEMENTS,
        }
    }
}

impl AchievementBook {
    /// Mark an achievement as earned. Returns the entry if this call unlocked it.
    pub fn unlock(&mut self, id: AchievementId) -> Option<Achievement> {
        let entry = &mut self.entries[id as usize];
        if entry.unlocked {
            return None;
        }
        entry.unlocked = true;
        Some(*entry)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.entries[id as usize].unlocked
    }

    pub fn get(&self, id: AchievementId) -> &Achievement {
        &self.entries[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.entries.iter()
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.unlocked).count()
    }

    /// Unlock flags keyed by persisted id.
    pub fn to_map(&self) -> BTreeMap<AchievementId, bool> {
        self.entries.iter().map(|a| (a.id, a.unlocked)).collect()
    }

    /// Merge stored flags. Entries already unlocked stay unlocked.
    pub fn merge(&mut self, flags: &BTreeMap<AchievementId, bool>) {
        for (id, unlocked) in flags {
            if *unlocked {
                self.unlock(*id);
            }
        }
    }
}
