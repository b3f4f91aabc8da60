//! Symbol definitions
//!
//! The drum face set is fixed: eight symbols in a fixed order. The order
//! matters twice: it is the tile order around every drum, and it is the order
//! the cumulative weight table is built in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A drum symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Symbol {
    /// Voids the whole line
    Blanks = 0,
    Grapes = 1,
    Bananas = 2,
    Oranges = 3,
    Cherries = 4,
    Bars = 5,
    Bells = 6,
    /// Jackpot symbol
    Sevens = 7,
}

impl Symbol {
    /// Number of distinct symbols (and tiles on a standard drum)
    pub const COUNT: usize = 8;

    /// All symbols in drum order
    pub const ALL: [Symbol; Symbol::COUNT] = [
        Symbol::Blanks,
        Symbol::Grapes,
        Symbol::Bananas,
        Symbol::Oranges,
        Symbol::Cherries,
        Symbol::Bars,
        Symbol::Bells,
        Symbol::Sevens,
    ];

    /// Position in drum order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Numeric ID used in stage events
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Symbol at a drum-order position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Symbol printed on a tile of a drum with any multiple of 8 tiles
    pub fn for_tile(tile: usize) -> Self {
        Self::ALL[tile % Self::COUNT]
    }

    /// Lowercase name, matches the serialized form
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Blanks => "blanks",
            Symbol::Grapes => "grapes",
            Symbol::Bananas => "bananas",
            Symbol::Oranges => "oranges",
            Symbol::Cherries => "cherries",
            Symbol::Bars => "bars",
            Symbol::Bells => "bells",
            Symbol::Sevens => "sevens",
        }
    }

    pub fn is_blank(self) -> bool {
        self == Symbol::Blanks
    }

    /// Canonical draw weight (percent)
    pub fn default_weight(self) -> u32 {
        match self {
            Symbol::Blanks => 25,
            Symbol::Grapes => 25,
            Symbol::Bananas => 15,
            Symbol::Oranges => 12,
            Symbol::Cherries => 8,
            Symbol::Bars => 7,
            Symbol::Bells => 5,
            Symbol::Sevens => 3,
        }
    }

    /// Canonical base multiplier; blanks pay nothing
    pub fn default_multiplier(self) -> Option<u64> {
        match self {
            Symbol::Blanks => None,
            Symbol::Grapes => Some(1),
            Symbol::Bananas => Some(2),
            Symbol::Oranges => Some(3),
            Symbol::Cherries => Some(4),
            Symbol::Bars => Some(5),
            Symbol::Bells => Some(6),
            Symbol::Sevens => Some(10),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbol {
    type Err = ConfigError;

    /// Accepts the serialized name, case-insensitive, with or without the plural `s`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Symbol::ALL
            .into_iter()
            .find(|sym| {
                let name = sym.name();
                name == wanted || name.strip_suffix('s') == Some(wanted.as_str())
            })
            .ok_or_else(|| ConfigError::InvalidValue(format!("unknown symbol: {}", s)))
    }
}
