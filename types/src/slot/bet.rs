use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BET_TIERS, STARTING_BET};

/// Rejected bet amounts.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetError {
    #[error("bet of {0} is not one of the allowed tiers")]
    UnknownTier(u64),
    #[error("bet of {bet} exceeds balance of {gold}")]
    Unaffordable { bet: u64, gold: u64 },
}

/// A wager from the fixed tier set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct BetTier(u64);

impl BetTier {
    pub const MIN: Self = Self(BET_TIERS[0]);
    pub const MAX: Self = Self(BET_TIERS[BET_TIERS.len() - 1]);

    pub fn amount(self) -> u64 {
        self.0
    }

    /// Every tier, ascending.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        BET_TIERS.iter().copied().map(Self)
    }

    /// Highest tier a balance can cover.
    pub fn max_affordable(gold: u64) -> Option<Self> {
        Self::all().rev().find(|tier| tier.0 <= gold)
    }

    /// Validate a tier against a balance.
    pub fn affordable(amount: u64, gold: u64) -> Result<Self, BetError> {
        let tier = Self::try_from(amount)?;
        if tier.0 > gold {
            return Err(BetError::Unaffordable { bet: amount, gold });
        }
        Ok(tier)
    }

    pub fn is_max(self) -> bool {
        self == Self::MAX
    }
}

impl Default for BetTier {
    fn default() -> Self {
        Self(STARTING_BET)
    }
}

impl TryFrom<u64> for BetTier {
    type Error = BetError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if BET_TIERS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(BetError::UnknownTier(value))
        }
    }
}

impl From<BetTier> for u64 {
    fn from(value: BetTier) -> Self {
        value.0
    }
}

impl std::fmt::Display for BetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
