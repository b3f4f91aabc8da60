//! Reel animator — per-drum spin/stop state machine
//!
//! ```text
//! Idle ──spin──► Spinning ──request_stop──► Stopping ──(lands on target)──► Settled
//!   ▲                                                                          │
//!   └───────────────────────────── reset (any state) ◄─────────────────────────┘
//!                                   Settled ──spin──► Spinning
//! ```
//!
//! The landing symbol is drawn when the stop is requested, never at settle
//! time. Once stopping, a reel cannot go back to spinning.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ReelConfig;
use crate::error::ConfigError;
use crate::outcome::OutcomeSource;
use crate::symbols::Symbol;

/// Reel lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReelState {
    Idle,
    Spinning,
    Stopping,
    Settled,
}

impl fmt::Display for ReelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReelState::Idle => "idle",
            ReelState::Spinning => "spinning",
            ReelState::Stopping => "stopping",
            ReelState::Settled => "settled",
        };
        f.write_str(name)
    }
}

/// Where a stopping reel is going to land
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopTarget {
    pub symbol: Symbol,
    pub tile: usize,
    pub angle: f64,
}

/// One drum
#[derive(Debug, Clone)]
pub struct ReelAnimator {
    config: ReelConfig,
    /// Current rotation (°), always in [0, 360)
    angle: f64,
    /// Current angular speed (°/s)
    speed: f64,
    state: ReelState,
    target: Option<StopTarget>,
    /// Time since the last deceleration step
    decel_elapsed: f64,
}

impl ReelAnimator {
    /// Create an idle reel showing tile 0; fails on an invalid reel config
    pub fn new(config: ReelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            angle: 0.0,
            speed: 0.0,
            state: ReelState::Idle,
            target: None,
            decel_elapsed: 0.0,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // COMMANDS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start spinning. No-op (returns false) while already spinning or stopping.
    pub fn spin<S: OutcomeSource + ?Sized>(&mut self, source: &mut S) -> bool {
        if self.is_spinning() {
            return false;
        }
        if self.config.randomize_start {
            let face = source.roll_face(self.config.tile_count);
            self.angle = self.tile_angle(face);
        }
        self.speed = self.config.spin_speed;
        self.state = ReelState::Spinning;
        self.target = None;
        self.decel_elapsed = 0.0;
        true
    }

    /// Commit the landing symbol and start slowing down.
    ///
    /// Only valid while spinning; returns the drawn symbol, or `None` when the
    /// request is ignored.
    pub fn request_stop<S: OutcomeSource + ?Sized>(&mut self, source: &mut S) -> Option<Symbol> {
        if self.state != ReelState::Spinning {
            return None;
        }

        let symbol = source.draw();
        let tile_count = self.config.tile_count;
        let lead_in = self.config.lead_in_tiles;

        // Any tile printed with the symbol will do; take the one whose lead-in
        // position is closest ahead of where the drum is now.
        let tile = (symbol.index()..tile_count)
            .step_by(Symbol::COUNT)
            .min_by(|&a, &b| {
                let da = self.forward_distance(self.tile_angle(a + tile_count - lead_in));
                let db = self.forward_distance(self.tile_angle(b + tile_count - lead_in));
                da.total_cmp(&db)
            })
            .unwrap_or(symbol.index());

        let target = StopTarget {
            symbol,
            tile,
            angle: self.tile_angle(tile),
        };
        self.angle = self.tile_angle(tile + tile_count - lead_in);
        self.speed /= self.config.deceleration.stop_divisor;
        self.state = ReelState::Stopping;
        self.target = Some(target);
        self.decel_elapsed = 0.0;
        Some(symbol)
    }

    /// Force Idle, showing `face` (or a random tile when `None`)
    pub fn reset<S: OutcomeSource + ?Sized>(&mut self, face: Option<usize>, source: &mut S) {
        let face = face.unwrap_or_else(|| source.roll_face(self.config.tile_count));
        self.angle = self.tile_angle(face);
        self.speed = 0.0;
        self.state = ReelState::Idle;
        self.target = None;
        self.decel_elapsed = 0.0;
    }

    /// Advance the animation by `dt` seconds. Returns true on the tick the reel settles.
    pub fn tick(&mut self, dt: f64) -> bool {
        match self.state {
            ReelState::Idle | ReelState::Settled => false,
            ReelState::Spinning => {
                self.advance(self.speed * dt);
                false
            }
            ReelState::Stopping => self.tick_stopping(dt),
        }
    }

    fn tick_stopping(&mut self, dt: f64) -> bool {
        let Some(target) = self.target else {
            // Stopping always carries a target; treat a missing one as landed
            self.state = ReelState::Settled;
            self.speed = 0.0;
            return true;
        };

        if self.speed <= 0.0 {
            self.settle(target);
            return true;
        }

        let decel = &self.config.deceleration;
        let crawl = decel.crawl_speed;
        self.decel_elapsed += dt;
        while self.decel_elapsed >= decel.interval_secs {
            self.decel_elapsed -= decel.interval_secs;
            self.speed = (self.speed * decel.factor).max(crawl);
        }

        let crawling = self.speed <= crawl;
        let before = self.offset_to(target.angle);
        let step = self.speed * dt;
        self.advance(step);

        // Passing the target at crawl speed counts as landing, so a coarse
        // tick can never skip the snap window forever.
        if crawling && before < 0.0 && before + step >= 0.0 {
            self.settle(target);
            return true;
        }

        if self.tile_index() == target.tile {
            self.speed = self.speed.min(crawl);
            if self.offset_to(target.angle).abs() <= self.config.settle_tolerance() {
                self.settle(target);
                return true;
            }
        }
        false
    }

    fn settle(&mut self, target: StopTarget) {
        self.angle = target.angle;
        self.speed = 0.0;
        self.state = ReelState::Settled;
        self.decel_elapsed = 0.0;
        log::debug!(
            "[Reel] settled on {} (tile {}, {:.1}°)",
            target.symbol,
            target.tile,
            target.angle
        );
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Spinning or stopping
    pub fn is_spinning(&self) -> bool {
        matches!(self.state, ReelState::Spinning | ReelState::Stopping)
    }

    /// Landed symbol, only once settled
    pub fn get_result(&self) -> Option<Symbol> {
        match self.state {
            ReelState::Settled => self.target.map(|t| t.symbol),
            _ => None,
        }
    }

    /// Symbol committed by the stop request (known before the reel lands)
    pub fn pending_result(&self) -> Option<Symbol> {
        match self.state {
            ReelState::Stopping | ReelState::Settled => self.target.map(|t| t.symbol),
            _ => None,
        }
    }

    pub fn state(&self) -> ReelState {
        self.state
    }

    /// Current rotation in degrees, in [0, 360)
    pub fn get_current_angle(&self) -> f64 {
        self.angle
    }

    /// Current angular speed (°/s)
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn target(&self) -> Option<StopTarget> {
        self.target
    }

    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    /// Tile currently facing the player: `round(angle / delta) mod tile_count`
    pub fn tile_index(&self) -> usize {
        (self.angle / self.config.angle_delta()).round() as usize % self.config.tile_count
    }

    /// Symbol currently facing the player
    pub fn displayed_symbol(&self) -> Symbol {
        Symbol::for_tile(self.tile_index())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ANGLE MATH
    // ═══════════════════════════════════════════════════════════════════════════

    fn tile_angle(&self, tile: usize) -> f64 {
        (tile % self.config.tile_count) as f64 * self.config.angle_delta()
    }

    fn advance(&mut self, degrees: f64) {
        self.angle = (self.angle + degrees).rem_euclid(360.0);
    }

    /// Degrees the drum still has to turn forward to reach `angle`
    fn forward_distance(&self, angle: f64) -> f64 {
        (angle - self.angle).rem_euclid(360.0)
    }

    /// Signed offset from `angle` in [-180, 180); negative means not reached yet
    fn offset_to(&self, angle: f64) -> f64 {
        (self.angle - angle + 180.0).rem_euclid(360.0) - 180.0
    }
}
