//! Slot machine configuration
//!
//! Every tunable constant of the core lives here. Configs can be loaded from
//! JSON or YAML and must pass [`SlotConfig::validate`] before a session is
//! built from them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::symbols::Symbol;
use crate::timing::TimingConfig;

/// Upper bound on reels per machine
pub const MAX_REELS: usize = 10;

/// Reference tile angle the settle tolerance is expressed against (8 tiles)
const REFERENCE_TILE_DEGREES: f64 = 360.0 / Symbol::COUNT as f64;

/// Stopping-phase speed schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecelerationConfig {
    /// Spin speed is divided by this when a stop is requested
    pub stop_divisor: f64,
    /// Multiplicative decay applied every `interval_secs` while stopping
    pub factor: f64,
    /// Seconds between decay steps
    pub interval_secs: f64,
    /// Floor speed used while creeping onto the target tile (°/s)
    pub crawl_speed: f64,
    /// Snap window around the target angle for an 8-tile drum (°),
    /// scaled proportionally for smaller tiles
    pub settle_tolerance_deg: f64,
}

impl Default for DecelerationConfig {
    fn default() -> Self {
        Self {
            stop_divisor: 4.0,
            factor: 0.5,
            interval_secs: 0.5,
            crawl_speed: 30.0,
            settle_tolerance_deg: 5.0,
        }
    }
}

/// Per-reel animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Tiles around the drum; a multiple of the symbol count
    pub tile_count: usize,
    /// Full spin speed (°/s)
    pub spin_speed: f64,
    /// Start every spin from a random tile
    pub randomize_start: bool,
    /// Tiles before the target the drum is placed at when a stop is requested
    pub lead_in_tiles: usize,
    /// Stopping-phase schedule
    pub deceleration: DecelerationConfig,
}

impl ReelConfig {
    /// Angle covered by one tile (°)
    pub fn angle_delta(&self) -> f64 {
        360.0 / self.tile_count as f64
    }

    /// Snap window scaled to this drum's tile size (°)
    pub fn settle_tolerance(&self) -> f64 {
        self.deceleration.settle_tolerance_deg * self.angle_delta() / REFERENCE_TILE_DEGREES
    }

    /// Validate reel parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_count == 0 || self.tile_count % Symbol::COUNT != 0 {
            return Err(ConfigError::InvalidReel(format!(
                "tile_count must be a positive multiple of {}, got {}",
                Symbol::COUNT,
                self.tile_count
            )));
        }
        if !positive(self.spin_speed) {
            return Err(ConfigError::InvalidReel(format!(
                "spin_speed must be positive, got {}",
                self.spin_speed
            )));
        }
        if self.lead_in_tiles >= self.tile_count {
            return Err(ConfigError::InvalidReel(format!(
                "lead_in_tiles {} must be below tile_count {}",
                self.lead_in_tiles, self.tile_count
            )));
        }

        let decel = &self.deceleration;
        if !(positive(decel.stop_divisor) && decel.stop_divisor >= 1.0) {
            return Err(ConfigError::InvalidReel("stop_divisor must be >= 1".into()));
        }
        if !(positive(decel.factor) && decel.factor < 1.0) {
            return Err(ConfigError::InvalidReel(format!(
                "deceleration factor must be in (0, 1), got {}",
                decel.factor
            )));
        }
        if !positive(decel.interval_secs) {
            return Err(ConfigError::InvalidReel("deceleration interval must be positive".into()));
        }
        let stop_speed = self.spin_speed / decel.stop_divisor;
        if !(positive(decel.crawl_speed) && decel.crawl_speed <= stop_speed) {
            return Err(ConfigError::InvalidReel(format!(
                "crawl_speed must be in (0, {stop_speed}], got {}",
                decel.crawl_speed
            )));
        }
        let tolerance = self.settle_tolerance();
        if !(positive(tolerance) && tolerance < self.angle_delta() / 2.0) {
            return Err(ConfigError::InvalidReel(format!(
                "settle tolerance {tolerance}° must be within half a tile ({}°)",
                self.angle_delta() / 2.0
            )));
        }
        Ok(())
    }
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            tile_count: Symbol::COUNT,
            spin_speed: 720.0,
            randomize_start: true,
            lead_in_tiles: 3,
            deceleration: DecelerationConfig::default(),
        }
    }
}

/// Progressive jackpot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JackpotConfig {
    /// Pool value at boot and after every payout
    pub seed: u64,
    /// Fraction of every bet added to the pool
    pub contribution_rate: f64,
    /// Sevens needed on the line (with no blanks) to win the pool
    pub trigger_count: usize,
}

impl Default for JackpotConfig {
    fn default() -> Self {
        Self {
            seed: 5000,
            contribution_rate: 0.10,
            trigger_count: 3,
        }
    }
}

/// Wallet defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub starting_balance: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
        }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Number of drums
    pub reel_count: usize,
    /// Drum animation parameters (shared by every reel)
    pub reel: ReelConfig,
    /// Draw weight per symbol, must sum to 100
    pub weights: BTreeMap<Symbol, u32>,
    /// Base multiplier per paying symbol
    pub multipliers: BTreeMap<Symbol, u64>,
    /// Jackpot pool
    pub jackpot: JackpotConfig,
    /// Wallet defaults
    pub wallet: WalletConfig,
    /// Auto-stop timing
    pub timing: TimingConfig,
    /// Tick cadence of the host loop (Hz)
    pub frame_rate: f64,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl SlotConfig {
    /// Classic three-drum machine
    pub fn classic() -> Self {
        Self {
            reel_count: 3,
            reel: ReelConfig::default(),
            weights: default_weights(),
            multipliers: default_multipliers(),
            jackpot: JackpotConfig::default(),
            wallet: WalletConfig::default(),
            timing: TimingConfig::default(),
            frame_rate: 60.0,
        }
    }

    /// Five-drum variant
    pub fn five_reel() -> Self {
        Self {
            reel_count: 5,
            ..Self::classic()
        }
    }

    /// Builder: set timing
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Builder: set reel count
    pub fn with_reel_count(mut self, reel_count: usize) -> Self {
        self.reel_count = reel_count;
        self
    }

    /// Validate the whole config; fails on the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reel_count == 0 || self.reel_count > MAX_REELS {
            return Err(ConfigError::InvalidReel(format!(
                "reel_count must be in 1..={MAX_REELS}, got {}",
                self.reel_count
            )));
        }
        self.reel.validate()?;
        validate_weights(&self.weights)?;
        validate_multipliers(&self.multipliers)?;

        if !(0.0..=1.0).contains(&self.jackpot.contribution_rate) {
            return Err(ConfigError::InvalidValue(format!(
                "jackpot contribution_rate must be in [0, 1], got {}",
                self.jackpot.contribution_rate
            )));
        }
        if self.jackpot.trigger_count == 0 {
            return Err(ConfigError::InvalidValue(
                "jackpot trigger_count must be at least 1".into(),
            ));
        }
        if !positive(self.frame_rate) {
            return Err(ConfigError::InvalidValue(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if self.timing.reel_spin_duration_secs < 0.0 || self.timing.reel_stop_interval_secs < 0.0 {
            return Err(ConfigError::InvalidValue("timing durations must be >= 0".into()));
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, format chosen by extension (`.json`, `.yaml`, `.yml`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Export as YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Canonical weight table
pub fn default_weights() -> BTreeMap<Symbol, u32> {
    Symbol::ALL
        .iter()
        .map(|&s| (s, s.default_weight()))
        .collect()
}

/// Canonical base multiplier table
pub fn default_multipliers() -> BTreeMap<Symbol, u64> {
    Symbol::ALL
        .iter()
        .filter_map(|&s| s.default_multiplier().map(|m| (s, m)))
        .collect()
}

/// Every symbol needs a weight and the weights must total 100
pub fn validate_weights(weights: &BTreeMap<Symbol, u32>) -> Result<(), ConfigError> {
    if let Some(missing) = Symbol::ALL.iter().find(|s| !weights.contains_key(s)) {
        return Err(ConfigError::MissingWeight(*missing));
    }
    let total: u64 = weights.values().map(|&w| u64::from(w)).sum();
    if total != 100 {
        return Err(ConfigError::WeightSum { total });
    }
    Ok(())
}

/// Every paying symbol needs a base multiplier
pub fn validate_multipliers(multipliers: &BTreeMap<Symbol, u64>) -> Result<(), ConfigError> {
    match Symbol::ALL
        .iter()
        .find(|s| !s.is_blank() && !multipliers.contains_key(s))
    {
        Some(missing) => Err(ConfigError::MissingMultiplier(*missing)),
        None => Ok(()),
    }
}
