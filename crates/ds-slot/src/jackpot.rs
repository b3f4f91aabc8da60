//! Progressive jackpot pool
//!
//! A fixed fraction of every bet feeds the pool; three or more sevens on a
//! blank-free line pay it out, after which it restarts from its seed.

use serde::{Deserialize, Serialize};

use crate::config::JackpotConfig;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JackpotPool {
    /// Current pool value
    value: u64,
    /// Value after boot, reset and payout
    seed: u64,
    /// Fraction of each bet added to the pool
    contribution_rate: f64,
    /// Sum of all contributions since the last reset
    total_contributions: u64,
    /// Payouts since the last reset
    times_won: u32,
}

impl JackpotPool {
    pub fn new(seed: u64, contribution_rate: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&contribution_rate) {
            return Err(ConfigError::InvalidValue(format!(
                "jackpot contribution_rate must be within [0, 1], got {}",
                contribution_rate
            )));
        }
        Ok(Self {
            value: seed,
            seed,
            contribution_rate,
            total_contributions: 0,
            times_won: 0,
        })
    }

    pub fn from_config(config: &JackpotConfig) -> Result<Self, ConfigError> {
        Self::new(config.seed, config.contribution_rate)
    }

    /// Add `floor(bet * rate)` to the pool, returning the amount added
    pub fn contribute(&mut self, bet: u64) -> u64 {
        let amount = (bet as f64 * self.contribution_rate).floor() as u64;
        self.value = self.value.saturating_add(amount);
        self.total_contributions = self.total_contributions.saturating_add(amount);
        amount
    }

    /// Pay out the whole pool and restart from the seed
    pub fn award(&mut self) -> u64 {
        let amount = self.value;
        self.value = self.seed;
        self.times_won += 1;
        log::info!("[Jackpot] awarded {} (reseeded to {})", amount, self.seed);
        amount
    }

    /// Back to boot state
    pub fn reset(&mut self) {
        self.value = self.seed;
        self.total_contributions = 0;
        self.times_won = 0;
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn contribution_rate(&self) -> f64 {
        self.contribution_rate
    }

    pub fn total_contributions(&self) -> u64 {
        self.total_contributions
    }

    pub fn times_won(&self) -> u32 {
        self.times_won
    }
}

impl Default for JackpotPool {
    fn default() -> Self {
        let config = JackpotConfig::default();
        Self {
            value: config.seed,
            seed: config.seed,
            contribution_rate: config.contribution_rate,
            total_contributions: 0,
            times_won: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool() {
        let pool = JackpotPool::default();
        assert_eq!(pool.value(), 5000);
        assert_eq!(pool.seed(), 5000);
    }

    #[test]
    fn test_contribution_floors() {
        let mut pool = JackpotPool::default();
        assert_eq!(pool.contribute(10), 1);
        assert_eq!(pool.contribute(19), 1);
        assert_eq!(pool.contribute(5), 0);
        assert_eq!(pool.value(), 5002);
        assert_eq!(pool.total_contributions(), 2);
    }

    #[test]
    fn test_award_reseeds() {
        let mut pool = JackpotPool::default();
        pool.contribute(500);
        assert_eq!(pool.award(), 5050);
        assert_eq!(pool.value(), 5000);
        assert_eq!(pool.times_won(), 1);
    }

    #[test]
    fn test_reset() {
        let mut pool = JackpotPool::new(100, 0.5).unwrap();
        pool.contribute(40);
        pool.award();
        pool.contribute(40);
        pool.reset();
        assert_eq!(pool.value(), 100);
        assert_eq!(pool.total_contributions(), 0);
        assert_eq!(pool.times_won(), 0);
    }

    #[test]
    fn test_invalid_rate() {
        assert!(JackpotPool::new(100, 1.5).is_err());
        assert!(JackpotPool::new(100, -0.1).is_err());
        assert!(JackpotPool::new(100, f64::NAN).is_err());
    }
}
