/// Reel symbols, in catalog order (rarest first)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SymbolId {
    Dragon = 0,
    Crown = 1,
    Wizard = 2,
    Diamond = 3,
    CrystalBall = 4,
    Sword = 5,
    Castle = 6,
    Shield = 7,
    Blade = 8,
}

/// A reel symbol with its payout value and draw weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub id: SymbolId,
    pub emoji: &'static str,
    pub name: &'static str,
    /// Triple payout at the baseline bet
    pub value: u64,
    /// Relative draw frequency
    pub weight: u64,
}

/// The symbol catalog. Order matters: draws walk it front to back.
pub const SYMBOLS: [Symbol; 9] = [
    Symbol {
        id: SymbolId::Dragon,
        emoji: "🐉",
        name: "Dragon",
        value: 1_000,
        weight: 1,
    },
    Symbol {
        id: SymbolId::Crown,
        emoji: "👑",
        name: "Crown",
        value: 500,
        weight: 2,
    },
    Symbol {
        id: SymbolId::Wizard,
        emoji: "🧙‍♂️",
        name: "Wizard",
        value: 250,
        weight: 3,
    },
    Symbol {
        id: SymbolId::Diamond,
        emoji: "💎",
        name: "Diamond",
        value: 200,
        weight: 4,
    },
    Symbol {
        id: SymbolId::CrystalBall,
        emoji: "🔮",
        name: "Crystal Ball",
        value: 150,
        weight: 5,
    },
    Symbol {
        id: SymbolId::Sword,
        emoji: "⚔️",
        name: "Sword",
        value: 100,
        weight: 6,
    },
    Symbol {
        id: SymbolId::Castle,
        emoji: "🏰",
        name: "Castle",
        value: 75,
        weight: 7,
    },
    Symbol {
        id: SymbolId::Shield,
        emoji: "🛡️",
        name: "Shield",
        value: 50,
        weight: 8,
    },
    Symbol {
        id: SymbolId::Blade,
        emoji: "🗡️",
        name: "Blade",
        value: 25,
        weight: 9,
    },
];

impl SymbolId {
    pub fn symbol(self) -> &'static Symbol {
        &SYMBOLS[self as usize]
    }
}

/// Sum of all catalog weights.
pub fn total_weight(symbols: &[Symbol]) -> u64 {
    symbols.iter().map(|s| s.weight).sum()
}

/// The symbol with the highest value in a catalog (first one on ties).
pub fn most_valuable(symbols: &[Symbol]) -> Option<&Symbol> {
    symbols
        .iter()
        .reduce(|best, s| if s.value > best.value { s } else { best })
}
