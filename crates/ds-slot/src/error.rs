//! Error types for the DrumSlot core

use thiserror::Error;

use crate::symbols::Symbol;

/// Configuration errors, raised when a config is validated or loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Symbol weights must sum to 100, got {total}")]
    WeightSum { total: u64 },

    #[error("Missing weight for symbol: {0}")]
    MissingWeight(Symbol),

    #[error("Missing base multiplier for symbol: {0}")]
    MissingMultiplier(Symbol),

    #[error("Invalid reel configuration: {0}")]
    InvalidReel(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Core error type
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Action '{action}' not permitted while {state}")]
    InvalidState {
        action: &'static str,
        state: String,
    },

    #[error("Bet {bet} rejected (balance {balance})")]
    InvalidBet { bet: i128, balance: u64 },

    #[error("Reel index {index} out of range ({count} reels)")]
    ReelIndex { index: usize, count: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SlotError {
    pub(crate) fn invalid_state(action: &'static str, state: impl std::fmt::Display) -> Self {
        Self::InvalidState {
            action,
            state: state.to_string(),
        }
    }
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
