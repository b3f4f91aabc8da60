//! Timing profiles and the fixed-step frame clock

use serde::{Deserialize, Serialize};

/// Reel auto-stop profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Reels spin until the player presses each stop control
    #[default]
    Manual,
    /// Automatic stops at a relaxed pace
    Normal,
    /// Fast automatic stops
    Turbo,
    /// Near-instant stops for headless simulation
    Studio,
}

/// Reel auto-stop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Time the first reel spins before it is stopped automatically (s)
    pub reel_spin_duration_secs: f64,

    /// Delay between automatic stops of consecutive reels (s)
    pub reel_stop_interval_secs: f64,
}

impl TimingConfig {
    /// Player-driven stops only
    pub fn manual() -> Self {
        Self {
            profile: TimingProfile::Manual,
            reel_spin_duration_secs: 0.0,
            reel_stop_interval_secs: 0.0,
        }
    }

    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            reel_spin_duration_secs: 5.0,
            reel_stop_interval_secs: 0.5,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            reel_spin_duration_secs: 1.0,
            reel_stop_interval_secs: 0.2,
        }
    }

    /// Studio mode (batch simulation, stops on the first frames)
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            reel_spin_duration_secs: 0.05,
            reel_stop_interval_secs: 0.0,
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Manual => Self::manual(),
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
        }
    }

    /// Whether reels are stopped without player input
    pub fn auto_stop(&self) -> bool {
        self.profile != TimingProfile::Manual
    }

    /// Seconds after spin start at which a reel is stopped automatically
    pub fn auto_stop_at(&self, reel_index: usize) -> Option<f64> {
        self.auto_stop()
            .then(|| self.reel_spin_duration_secs + reel_index as f64 * self.reel_stop_interval_secs)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::manual()
    }
}

/// Fixed-step frame clock
///
/// Converts arbitrary host frame intervals into a whole number of fixed ticks,
/// carrying the remainder over to the next call.
#[derive(Debug, Clone)]
pub struct FrameClock {
    step_secs: f64,
    accumulator: f64,
    max_steps: u32,
}

impl FrameClock {
    /// Clock ticking `frame_rate` times per second
    pub fn from_rate(frame_rate: f64) -> Self {
        Self {
            step_secs: 1.0 / frame_rate,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    /// Cap the ticks produced by a single `advance` (long stalls are dropped)
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Fixed tick length (s)
    pub fn step(&self) -> f64 {
        self.step_secs
    }

    /// Feed elapsed wall time and return how many fixed ticks are due
    pub fn advance(&mut self, elapsed_secs: f64) -> u32 {
        self.accumulator += elapsed_secs.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step_secs && steps < self.max_steps {
            self.accumulator -= self.step_secs;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.step_secs);
        }
        steps
    }

    /// Drop any carried-over time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::from_rate(60.0)
    }
}
