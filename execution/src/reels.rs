//! Weighted reel generation.
//!
//! Symbols are drawn independently for each reel (with replacement), so
//! repeats across reels are expected. A draw maps a uniform value `u` in
//! `[0, 1)` onto the cumulative weight table: `r = u * total`, and the first
//! symbol whose cumulative weight reaches `r` is selected.

use rand::{Rng, RngCore};
use reelquest_types::slot::{SpinOutcome, Symbol, SymbolId, SYMBOLS};
use thiserror::Error;

/// A source of uniform values in `[0, 1)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapts any `rand` generator into a [UniformSource].
#[derive(Clone, Debug)]
pub struct RngSource<R>(pub R);

impl<R: RngCore> UniformSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Invalid symbol catalogs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    #[error("symbol catalog is empty")]
    Empty,
    #[error("symbol {0:?} has zero weight")]
    ZeroWeight(SymbolId),
}

/// Precomputed cumulative weights over a symbol catalog.
#[derive(Clone, Debug)]
pub struct ReelTable {
    symbols: Vec<Symbol>,
    cumulative: Vec<u64>,
}

impl Default for ReelTable {
    fn default() -> Self {
        Self::build(&SYMBOLS)
    }
}

impl ReelTable {
    pub fn new(symbols: &[Symbol]) -> Result<Self, CatalogError> {
        if symbols.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(symbol) = symbols.iter().find(|s| s.weight == 0) {
            return Err(CatalogError::ZeroWeight(symbol.id));
        }
        Ok(Self::build(symbols))
    }

    fn build(symbols: &[Symbol]) -> Self {
        let cumulative = symbols
            .iter()
            .scan(0u64, |running, symbol| {
                *running += symbol.weight;
                Some(*running)
            })
            .collect();
        Self {
            symbols: symbols.to_vec(),
            cumulative,
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Map a uniform value onto a symbol.
    pub fn select(&self, unit: f64) -> Symbol {
        let target = unit * self.total_weight() as f64;
        let index = self
            .cumulative
            .partition_point(|&weight| (weight as f64) < target);

        // Rounding can push `target` past the final boundary
        self.symbols[index.min(self.symbols.len() - 1)]
    }

    /// Draw a single symbol.
    pub fn draw(&self, source: &mut impl UniformSource) -> Symbol {
        self.select(source.next_unit())
    }

    /// Draw every reel, left to right.
    pub fn spin(&self, source: &mut impl UniformSource) -> SpinOutcome {
        SpinOutcome::new(std::array::from_fn(|_| self.draw(source)))
    }
}
