//! Stage — The enum defining every canonical moment of a DrumSlot session
//!
//! A Stage is the SEMANTIC MEANING of a moment in the game flow,
//! not an animation frame.

use serde::{Deserialize, Serialize};

/// Canonical game stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SESSION
    // ═══════════════════════════════════════════════════════════════════════
    /// Player left the welcome screen
    SessionStart {
        /// Balance at the moment the session became active
        balance: u64,
    },

    /// Counters, wallet and reels restored to defaults
    SessionReset,

    /// Machine switched off, back to the welcome screen
    PowerOff,

    /// Current bet adjusted by the player
    BetChanged {
        bet: u64,
        #[serde(default)]
        previous: u64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Spin accepted, bet deducted
    SpinStart {
        bet: u64,
        /// Turn number (1-based)
        turn: u64,
    },

    /// Single reel starts spinning
    ReelSpinningStart {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// Stop accepted for a reel; the landing symbol is already decided
    ReelStopRequested {
        reel_index: u8,
        symbol_id: u32,
    },

    /// Reel has settled on its final symbol
    ReelStop {
        reel_index: u8,
        symbol_id: u32,
    },

    /// All reels settled, payout being evaluated
    EvaluateWins,

    /// Round ended, ready for next spin
    SpinEnd,

    // ═══════════════════════════════════════════════════════════════════════
    // WIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Winning round
    WinPresent {
        /// Total credited amount (line win plus any jackpot)
        win_amount: u64,
        /// Line multiplier applied to the bet
        #[serde(default)]
        multiplier: u64,
    },

    /// Losing round
    SpinLost {
        #[serde(default)]
        bet: u64,
    },

    /// Jackpot pool paid out
    JackpotWin {
        amount: u64,
    },
}

impl Stage {
    /// Get stage category
    pub fn category(&self) -> StageCategory {
        match self {
            Stage::SessionStart { .. }
            | Stage::SessionReset
            | Stage::PowerOff
            | Stage::BetChanged { .. } => StageCategory::Session,

            Stage::SpinStart { .. }
            | Stage::ReelSpinningStart { .. }
            | Stage::ReelStopRequested { .. }
            | Stage::ReelStop { .. }
            | Stage::EvaluateWins
            | Stage::SpinEnd => StageCategory::SpinLifecycle,

            Stage::WinPresent { .. } | Stage::SpinLost { .. } => StageCategory::WinLifecycle,

            Stage::JackpotWin { .. } => StageCategory::Jackpot,
        }
    }

    /// Get a simple string name for this stage type
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SessionStart { .. } => "session_start",
            Stage::SessionReset => "session_reset",
            Stage::PowerOff => "power_off",
            Stage::BetChanged { .. } => "bet_changed",
            Stage::SpinStart { .. } => "spin_start",
            Stage::ReelSpinningStart { .. } => "reel_spinning_start",
            Stage::ReelStopRequested { .. } => "reel_stop_requested",
            Stage::ReelStop { .. } => "reel_stop",
            Stage::EvaluateWins => "evaluate_wins",
            Stage::SpinEnd => "spin_end",
            Stage::WinPresent { .. } => "win_present",
            Stage::SpinLost { .. } => "spin_lost",
            Stage::JackpotWin { .. } => "jackpot_win",
        }
    }

    /// Check if this is a looping stage (audio should loop until the next stage)
    pub fn is_looping(&self) -> bool {
        matches!(self, Stage::ReelSpinningStart { .. })
    }

    /// Reel index carried by per-reel stages
    pub fn reel_index(&self) -> Option<u8> {
        match self {
            Stage::ReelSpinningStart { reel_index }
            | Stage::ReelStopRequested { reel_index, .. }
            | Stage::ReelStop { reel_index, .. } => Some(*reel_index),
            _ => None,
        }
    }

    /// Get all valid stage type names for validation
    pub fn all_type_names() -> &'static [&'static str] {
        &[
            "session_start",
            "session_reset",
            "power_off",
            "bet_changed",
            "spin_start",
            "reel_spinning_start",
            "reel_stop_requested",
            "reel_stop",
            "evaluate_wins",
            "spin_end",
            "win_present",
            "spin_lost",
            "jackpot_win",
        ]
    }
}

/// Stage category for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCategory {
    Session,
    SpinLifecycle,
    WinLifecycle,
    Jackpot,
}

impl StageCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Session => "Session",
            Self::SpinLifecycle => "Spin Lifecycle",
            Self::WinLifecycle => "Win Lifecycle",
            Self::Jackpot => "Jackpot",
        }
    }
}
