//! Outcome sources — where a reel's landing symbol comes from
//!
//! A reel's result is drawn exactly once, at the moment a stop is requested.

use std::collections::BTreeMap;

use rand::prelude::*;

use crate::config::{SlotConfig, validate_weights};
use crate::error::ConfigError;
use crate::symbols::Symbol;

/// Anything that can decide reel outcomes
pub trait OutcomeSource {
    /// Draw the landing symbol for one reel
    fn draw(&mut self) -> Symbol;

    /// Pick a uniformly random tile on a drum with `tile_count` tiles
    fn roll_face(&mut self, tile_count: usize) -> usize;
}

impl<T: OutcomeSource + ?Sized> OutcomeSource for &mut T {
    fn draw(&mut self) -> Symbol {
        (**self).draw()
    }

    fn roll_face(&mut self, tile_count: usize) -> usize {
        (**self).roll_face(tile_count)
    }
}

/// Cumulative-range lookup table built from a weight map
///
/// Ranges are contiguous, non-overlapping and laid out in drum order;
/// the first range containing a roll wins.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    /// (inclusive upper bound, symbol)
    ranges: Vec<(u32, Symbol)>,
    total: u32,
}

impl WeightTable {
    /// Build from a validated weight map
    pub fn new(weights: &BTreeMap<Symbol, u32>) -> Result<Self, ConfigError> {
        validate_weights(weights)?;

        let mut upper = 0;
        let ranges = Symbol::ALL
            .iter()
            .map(|symbol| {
                upper += weights[symbol];
                (upper, *symbol)
            })
            .collect();

        Ok(Self {
            ranges,
            total: upper,
        })
    }

    /// Sum of all weights (the roll space is `1..=total`)
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Map a roll in `1..=total` to its symbol
    pub fn lookup(&self, roll: u32) -> Symbol {
        self.ranges
            .iter()
            .find(|(upper, _)| roll <= *upper)
            .map(|(_, symbol)| *symbol)
            .unwrap_or(Symbol::Sevens)
    }

    /// Inclusive roll range mapped to a symbol, `None` for zero weight
    pub fn range_of(&self, symbol: Symbol) -> Option<(u32, u32)> {
        let idx = symbol.index();
        let upper = self.ranges[idx].0;
        let lower = if idx == 0 { 1 } else { self.ranges[idx - 1].0 + 1 };
        (lower <= upper).then_some((lower, upper))
    }

    /// Configured probability of a symbol (0.0 - 1.0)
    pub fn probability(&self, symbol: Symbol) -> f64 {
        self.range_of(symbol)
            .map(|(lo, hi)| (hi - lo + 1) as f64 / self.total as f64)
            .unwrap_or(0.0)
    }
}

/// Production outcome source: weighted random draw
pub struct RandomOutcomeGenerator {
    table: WeightTable,
    rng: StdRng,
}

impl RandomOutcomeGenerator {
    /// Create from a weight map, seeded from the OS
    pub fn new(weights: &BTreeMap<Symbol, u32>) -> Result<Self, ConfigError> {
        Ok(Self {
            table: WeightTable::new(weights)?,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Create with a fixed seed for reproducible results
    pub fn seeded(weights: &BTreeMap<Symbol, u32>, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            table: WeightTable::new(weights)?,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Create from a machine config
    pub fn from_config(config: &SlotConfig) -> Result<Self, ConfigError> {
        Self::new(&config.weights)
    }

    /// Reseed RNG
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Underlying lookup table
    pub fn table(&self) -> &WeightTable {
        &self.table
    }
}

impl OutcomeSource for RandomOutcomeGenerator {
    fn draw(&mut self) -> Symbol {
        let roll = self.rng.random_range(1..=self.table.total());
        self.table.lookup(roll)
    }

    fn roll_face(&mut self, tile_count: usize) -> usize {
        self.rng.random_range(0..tile_count.max(1))
    }
}

/// Replays a fixed symbol sequence (forced outcomes)
///
/// Draws cycle through the script; an empty script always lands on blanks.
/// Faces advance one tile per call.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOutcomes {
    script: Vec<Symbol>,
    cursor: usize,
    face_cursor: usize,
}

impl ScriptedOutcomes {
    pub fn new(script: impl Into<Vec<Symbol>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
            face_cursor: 0,
        }
    }

    /// Replace the script and restart from its first entry
    pub fn set_script(&mut self, script: impl Into<Vec<Symbol>>) {
        self.script = script.into();
        self.cursor = 0;
    }

    /// Number of symbols drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn draw(&mut self) -> Symbol {
        if self.script.is_empty() {
            return Symbol::Blanks;
        }
        let symbol = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        symbol
    }

    fn roll_face(&mut self, tile_count: usize) -> usize {
        let face = self.face_cursor % tile_count.max(1);
        self.face_cursor += 1;
        face
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_weights;

    #[test]
    fn test_cumulative_boundaries() {
        let table = WeightTable::new(&default_weights()).unwrap();
        let cases = [
            (1, Symbol::Blanks),
            (25, Symbol::Blanks),
            (26, Symbol::Grapes),
            (50, Symbol::Grapes),
            (51, Symbol::Bananas),
            (65, Symbol::Bananas),
            (66, Symbol::Oranges),
            (77, Symbol::Oranges),
            (78, Symbol::Cherries),
            (85, Symbol::Cherries),
            (86, Symbol::Bars),
            (92, Symbol::Bars),
            (93, Symbol::Bells),
            (97, Symbol::Bells),
            (98, Symbol::Sevens),
            (100, Symbol::Sevens),
        ];
        for (roll, expected) in cases {
            assert_eq!(table.lookup(roll), expected, "roll {roll}");
        }
    }

    #[test]
    fn test_ranges_are_contiguous() {
        let table = WeightTable::new(&default_weights()).unwrap();
        let mut next = 1;
        for symbol in Symbol::ALL {
            let (lo, hi) = table.range_of(symbol).unwrap();
            assert_eq!(lo, next);
            assert_eq!(hi - lo + 1, symbol.default_weight());
            next = hi + 1;
        }
        assert_eq!(next, 101);
    }

    #[test]
    fn test_zero_weight_symbol_never_drawn() {
        let mut weights = default_weights();
        weights.insert(Symbol::Sevens, 0);
        weights.insert(Symbol::Blanks, 28);
        let table = WeightTable::new(&weights).unwrap();
        assert_eq!(table.range_of(Symbol::Sevens), None);
        assert!((1..=100).all(|roll| table.lookup(roll) != Symbol::Sevens));
    }

    #[test]
    fn test_invalid_table_rejected() {
        let mut weights = default_weights();
        weights.insert(Symbol::Grapes, 10);
        assert!(matches!(
            WeightTable::new(&weights),
            Err(ConfigError::WeightSum { total: 85 })
        ));
    }

    #[test]
    fn test_draw_distribution_converges() {
        let mut generator = RandomOutcomeGenerator::seeded(&default_weights(), 7).unwrap();
        let samples = 200_000;
        let mut counts = [0usize; Symbol::COUNT];
        for _ in 0..samples {
            counts[generator.draw().index()] += 1;
        }
        for symbol in Symbol::ALL {
            let observed = counts[symbol.index()] as f64 / samples as f64;
            let expected = generator.table().probability(symbol);
            assert!(
                (observed - expected).abs() < 0.01,
                "{symbol}: observed {observed:.4}, expected {expected:.4}"
            );
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = RandomOutcomeGenerator::seeded(&default_weights(), 99).unwrap();
        let mut b = RandomOutcomeGenerator::seeded(&default_weights(), 99).unwrap();
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
            assert_eq!(a.roll_face(8), b.roll_face(8));
        }
    }

    #[test]
    fn test_roll_face_in_range() {
        let mut generator = RandomOutcomeGenerator::seeded(&default_weights(), 3).unwrap();
        assert!((0..1000).all(|_| generator.roll_face(16) < 16));
    }

    #[test]
    fn test_scripted_cycles() {
        let mut scripted = ScriptedOutcomes::new(vec![Symbol::Sevens, Symbol::Bells]);
        assert_eq!(scripted.draw(), Symbol::Sevens);
        assert_eq!(scripted.draw(), Symbol::Bells);
        assert_eq!(scripted.draw(), Symbol::Sevens);
        assert_eq!(scripted.draws(), 3);

        let mut empty = ScriptedOutcomes::default();
        assert_eq!(empty.draw(), Symbol::Blanks);
        assert_eq!(empty.roll_face(8), 0);
        assert_eq!(empty.roll_face(8), 1);
    }
}
