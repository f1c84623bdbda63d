use super::{Symbol, REELS};

/// The symbols at rest on each reel after a spin, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinOutcome {
    pub reels: [Symbol; REELS],
}

impl SpinOutcome {
    pub fn new(reels: [Symbol; REELS]) -> Self {
        Self { reels }
    }
}

impl std::fmt::Display for SpinOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, symbol) in self.reels.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(symbol.emoji)?;
        }
        Ok(())
    }
}

/// How a spin paid out
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WinKind {
    Triple,
    Double,
    None,
}

/// Settlement of a spin outcome against the bet that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinResult {
    pub kind: WinKind,
    pub symbol: Option<Symbol>,
    pub amount: u64,
    /// Matched emojis, e.g. "🐉🐉🐉"
    pub combo: String,
}

impl WinResult {
    pub fn loss() -> Self {
        Self {
            kind: WinKind::None,
            symbol: None,
            amount: 0,
            combo: String::new(),
        }
    }

    pub fn is_win(&self) -> bool {
        self.kind != WinKind::None
    }
}
