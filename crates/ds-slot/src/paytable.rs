//! Payout evaluation
//!
//! The landed symbols form a single line read left to right. A blank anywhere
//! voids the line. Otherwise the line is split into maximal runs of equal
//! adjacent symbols and each run pays `base_multiplier * run_length²`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{SlotConfig, default_multipliers, validate_multipliers};
use crate::error::ConfigError;
use crate::symbols::Symbol;

/// One maximal run of equal adjacent symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRun {
    pub symbol: Symbol,
    /// Reel index of the first symbol in the run
    pub start: usize,
    /// Run length
    pub count: usize,
    /// `base_multiplier * count²`
    pub contribution: u64,
}

/// Result of evaluating one line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Sum of all run contributions (0 when any blank landed)
    pub multiplier: u64,
    /// No blanks and enough sevens
    pub is_jackpot: bool,
    /// Scored runs, in reel order (empty when the line is void)
    pub runs: Vec<SymbolRun>,
    /// `bet * multiplier`, jackpot excluded
    pub line_win: u64,
}

impl Evaluation {
    pub fn is_win(&self) -> bool {
        self.multiplier > 0 || self.is_jackpot
    }

    /// Longest run on the line
    pub fn longest_run(&self) -> Option<&SymbolRun> {
        self.runs.iter().max_by_key(|r| r.count)
    }
}

/// Base multipliers plus the jackpot trigger
#[derive(Debug, Clone)]
pub struct Paytable {
    multipliers: BTreeMap<Symbol, u64>,
    jackpot_trigger_count: usize,
}

impl Paytable {
    /// Build from a multiplier table; every paying symbol needs an entry
    pub fn new(multipliers: BTreeMap<Symbol, u64>, jackpot_trigger_count: usize) -> Result<Self, ConfigError> {
        validate_multipliers(&multipliers)?;
        if jackpot_trigger_count == 0 {
            return Err(ConfigError::InvalidValue(
                "jackpot trigger_count must be at least 1".into(),
            ));
        }
        Ok(Self {
            multipliers,
            jackpot_trigger_count,
        })
    }

    pub fn from_config(config: &SlotConfig) -> Result<Self, ConfigError> {
        Self::new(config.multipliers.clone(), config.jackpot.trigger_count)
    }

    /// Canonical table: grapes 1 … sevens 10, jackpot on 3 sevens
    pub fn standard() -> Self {
        Self {
            multipliers: default_multipliers(),
            jackpot_trigger_count: 3,
        }
    }

    /// Base multiplier of a symbol (0 for blanks)
    pub fn base_multiplier(&self, symbol: Symbol) -> u64 {
        if symbol.is_blank() {
            return 0;
        }
        self.multipliers.get(&symbol).copied().unwrap_or(0)
    }

    pub fn jackpot_trigger_count(&self) -> usize {
        self.jackpot_trigger_count
    }

    /// Score a line of landed symbols for `bet`
    pub fn evaluate(&self, results: &[Symbol], bet: u64) -> Evaluation {
        if results.is_empty() || results.iter().any(|s| s.is_blank()) {
            return Evaluation::default();
        }

        let mut runs = Vec::new();
        let mut start = 0;
        for chunk in results.chunk_by(|a, b| a == b) {
            let count = chunk.len();
            let symbol = chunk[0];
            let squared = (count as u64).saturating_mul(count as u64);
            runs.push(SymbolRun {
                symbol,
                start,
                count,
                contribution: self.base_multiplier(symbol).saturating_mul(squared),
            });
            start += count;
        }

        let multiplier = runs
            .iter()
            .fold(0u64, |acc, run| acc.saturating_add(run.contribution));
        let sevens = results.iter().filter(|&&s| s == Symbol::Sevens).count();

        Evaluation {
            multiplier,
            is_jackpot: sevens >= self.jackpot_trigger_count,
            runs,
            line_win: bet.saturating_mul(multiplier),
        }
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    #[test]
    fn test_full_run_squares() {
        let eval = Paytable::standard().evaluate(&[Grapes, Grapes, Grapes], 10);
        assert_eq!(eval.multiplier, 9);
        assert_eq!(eval.line_win, 90);
        assert!(!eval.is_jackpot);
        assert_eq!(eval.runs.len(), 1);
    }

    #[test]
    fn test_broken_run_scores_each_part() {
        let eval = Paytable::standard().evaluate(&[Grapes, Bananas, Grapes], 1);
        assert_eq!(eval.multiplier, 1 + 2 + 1);
        assert_eq!(eval.runs.len(), 3);
        assert_eq!(eval.runs[2].start, 2);
    }

    #[test]
    fn test_any_blank_voids_line() {
        let paytable = Paytable::standard();
        for line in [
            [Blanks, Sevens, Sevens],
            [Sevens, Blanks, Sevens],
            [Sevens, Sevens, Blanks],
            [Blanks, Blanks, Blanks],
        ] {
            let eval = paytable.evaluate(&line, 100);
            assert_eq!(eval.multiplier, 0);
            assert!(!eval.is_jackpot);
            assert!(eval.runs.is_empty());
            assert!(!eval.is_win());
        }
    }

    #[test]
    fn test_three_sevens_is_jackpot() {
        let eval = Paytable::standard().evaluate(&[Sevens, Sevens, Sevens], 1);
        assert!(eval.is_jackpot);
        assert_eq!(eval.multiplier, 90);
    }

    #[test]
    fn test_scattered_sevens_on_five_reels() {
        let paytable = Paytable::standard();
        let eval = paytable.evaluate(&[Sevens, Bells, Sevens, Bells, Sevens], 2);
        assert!(eval.is_jackpot);
        assert_eq!(eval.multiplier, 10 + 6 + 10 + 6 + 10);
        assert_eq!(eval.line_win, 84);

        let two = paytable.evaluate(&[Sevens, Sevens, Bells, Bells, Bars], 1);
        assert!(!two.is_jackpot);
        assert_eq!(two.multiplier, 40 + 24 + 5);
        assert_eq!(two.longest_run().map(|r| r.count), Some(2));
    }

    #[test]
    fn test_empty_line() {
        let eval = Paytable::standard().evaluate(&[], 10);
        assert_eq!(eval, Evaluation::default());
    }

    #[test]
    fn test_custom_trigger_count() {
        let paytable = Paytable::new(default_multipliers(), 2).unwrap();
        assert!(paytable.evaluate(&[Sevens, Cherries, Sevens], 1).is_jackpot);
        assert!(Paytable::new(default_multipliers(), 0).is_err());
    }

    #[test]
    fn test_missing_multiplier_rejected() {
        let mut multipliers = default_multipliers();
        multipliers.remove(&Bells);
        assert!(matches!(
            Paytable::new(multipliers, 3),
            Err(ConfigError::MissingMultiplier(Bells))
        ));
    }
}
