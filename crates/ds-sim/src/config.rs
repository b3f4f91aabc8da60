//! Batch simulation configuration

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Configuration for a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Independent sessions to play
    pub sessions: usize,

    /// Rounds per session (a session ends early once it cannot cover the bet)
    pub spins_per_session: u64,

    /// Bet placed every round
    pub bet: u64,

    /// Master seed (None = random)
    pub seed: Option<u64>,

    /// Worker threads (0 = rayon default)
    pub threads: usize,

    /// Upper bound on ticks per round before the run is declared stalled
    pub max_ticks_per_round: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sessions: 8,
            spins_per_session: 1_000,
            bet: 1,
            seed: None,
            threads: 0,
            max_ticks_per_round: 60 * 120,
        }
    }
}

impl SimConfig {
    /// Builder: set number of sessions
    pub fn with_sessions(mut self, sessions: usize) -> Self {
        self.sessions = sessions;
        self
    }

    /// Builder: set rounds per session
    pub fn with_spins(mut self, spins: u64) -> Self {
        self.spins_per_session = spins;
        self
    }

    /// Builder: set the bet
    pub fn with_bet(mut self, bet: u64) -> Self {
        self.bet = bet;
        self
    }

    /// Builder: set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set worker threads
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.sessions == 0 {
            return Err(SimError::InvalidConfig("sessions must be at least 1".into()));
        }
        if self.bet == 0 {
            return Err(SimError::InvalidConfig("bet must be at least 1".into()));
        }
        if self.max_ticks_per_round == 0 {
            return Err(SimError::InvalidConfig(
                "max_ticks_per_round must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
