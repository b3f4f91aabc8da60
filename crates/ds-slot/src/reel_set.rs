//! Reel set — coordinates every drum of the machine

use crate::config::{MAX_REELS, ReelConfig, SlotConfig};
use crate::error::{ConfigError, SlotError, SlotResult};
use crate::outcome::OutcomeSource;
use crate::reel::{ReelAnimator, ReelState};
use crate::symbols::Symbol;
use crate::timing::TimingConfig;

/// What happened to the reels during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReelTick {
    /// Stops issued automatically this tick (reel, committed symbol)
    pub auto_stops: Vec<(usize, Symbol)>,
    /// Reels that settled this tick (reel, landed symbol)
    pub settled: Vec<(usize, Symbol)>,
}

/// Ordered set of drums plus one stop control per drum
#[derive(Debug, Clone)]
pub struct ReelSet {
    reels: Vec<ReelAnimator>,
    /// Stop control armed for each reel
    stop_controls: Vec<bool>,
    timing: TimingConfig,
    /// Seconds since the last `spin_all`
    spin_elapsed: f64,
}

impl ReelSet {
    /// Create `reel_count` idle reels sharing one reel config
    pub fn new(reel_count: usize, reel: ReelConfig, timing: TimingConfig) -> Result<Self, ConfigError> {
        if reel_count == 0 || reel_count > MAX_REELS {
            return Err(ConfigError::InvalidReel(format!(
                "reel_count must be in 1..={MAX_REELS}, got {reel_count}"
            )));
        }
        let reels = (0..reel_count)
            .map(|_| ReelAnimator::new(reel.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            reels,
            stop_controls: vec![false; reel_count],
            timing,
            spin_elapsed: 0.0,
        })
    }

    /// Create from a machine config
    pub fn from_config(config: &SlotConfig) -> Result<Self, ConfigError> {
        Self::new(config.reel_count, config.reel.clone(), config.timing.clone())
    }

    /// Spin every reel that is not already spinning and arm its stop control.
    /// Returns the indices of the reels that started.
    pub fn spin_all<S: OutcomeSource + ?Sized>(&mut self, source: &mut S) -> Vec<usize> {
        self.spin_elapsed = 0.0;
        let mut started = Vec::with_capacity(self.reels.len());
        for (i, reel) in self.reels.iter_mut().enumerate() {
            if reel.spin(source) {
                self.stop_controls[i] = true;
                started.push(i);
            }
        }
        started
    }

    /// Request a stop on one reel.
    ///
    /// Ignored (returns `None`) for an out-of-range index, a disarmed stop
    /// control, or a reel that is not spinning.
    pub fn stop<S: OutcomeSource + ?Sized>(&mut self, index: usize, source: &mut S) -> Option<Symbol> {
        if !self.stop_control_active(index) {
            return None;
        }
        self.stop_controls[index] = false;
        let symbol = self.reels[index].request_stop(source)?;
        log::debug!("[ReelSet] reel {} stopping on {}", index, symbol);
        Some(symbol)
    }

    /// Advance every reel by `dt`, issuing due auto-stops first
    pub fn tick<S: OutcomeSource + ?Sized>(&mut self, dt: f64, source: &mut S) -> ReelTick {
        let mut out = ReelTick::default();

        if self.reels.iter().any(ReelAnimator::is_spinning) {
            self.spin_elapsed += dt;
            for index in 0..self.reels.len() {
                let due = self
                    .timing
                    .auto_stop_at(index)
                    .is_some_and(|at| self.spin_elapsed >= at);
                if !due {
                    continue;
                }
                if let Some(symbol) = self.stop(index, source) {
                    out.auto_stops.push((index, symbol));
                }
            }
        }

        for (index, reel) in self.reels.iter_mut().enumerate() {
            if reel.tick(dt) {
                if let Some(symbol) = reel.get_result() {
                    out.settled.push((index, symbol));
                }
            }
        }
        out
    }

    /// True when no reel is spinning or stopping
    pub fn all_settled(&self) -> bool {
        self.reels.iter().all(|r| !r.is_spinning())
    }

    /// Landed symbols in reel order; every reel must be settled
    pub fn collect_results(&self) -> SlotResult<Vec<Symbol>> {
        self.reels
            .iter()
            .map(|reel| {
                reel.get_result()
                    .ok_or_else(|| SlotError::invalid_state("collect_results", reel.state()))
            })
            .collect()
    }

    /// Reset every reel to Idle and disarm all stop controls.
    /// `faces` pins each reel's tile; missing entries are randomized.
    pub fn reset_all<S: OutcomeSource + ?Sized>(&mut self, faces: Option<&[usize]>, source: &mut S) {
        for (i, reel) in self.reels.iter_mut().enumerate() {
            let face = faces.and_then(|f| f.get(i).copied());
            reel.reset(face, source);
        }
        self.stop_controls.fill(false);
        self.spin_elapsed = 0.0;
    }

    /// Whether the stop control of a reel is armed
    pub fn stop_control_active(&self, index: usize) -> bool {
        self.stop_controls.get(index).copied().unwrap_or(false)
    }

    /// Reel by index
    pub fn reel(&self, index: usize) -> SlotResult<&ReelAnimator> {
        self.reels.get(index).ok_or(SlotError::ReelIndex {
            index,
            count: self.reels.len(),
        })
    }

    pub fn reels(&self) -> &[ReelAnimator] {
        &self.reels
    }

    /// Per-reel states in order
    pub fn states(&self) -> Vec<ReelState> {
        self.reels.iter().map(ReelAnimator::state).collect()
    }

    /// Symbols currently facing the player
    pub fn displayed_symbols(&self) -> Vec<Symbol> {
        self.reels.iter().map(ReelAnimator::displayed_symbol).collect()
    }

    pub fn len(&self) -> usize {
        self.reels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }

    pub fn set_timing(&mut self, timing: TimingConfig) {
        self.timing = timing;
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ScriptedOutcomes;

    const DT: f64 = 1.0 / 60.0;

    fn classic_set(timing: TimingConfig) -> ReelSet {
        ReelSet::new(3, ReelConfig::default(), timing).unwrap()
    }

    fn tick_until_settled(set: &mut ReelSet, source: &mut ScriptedOutcomes) -> Vec<(usize, Symbol)> {
        let mut settled = Vec::new();
        for _ in 0..60 * 30 {
            settled.extend(set.tick(DT, source).settled);
            if set.all_settled() {
                return settled;
            }
        }
        panic!("reels did not settle");
    }

    #[test]
    fn test_spin_all_arms_controls() {
        let mut source = ScriptedOutcomes::default();
        let mut set = classic_set(TimingConfig::manual());
        assert!(set.all_settled());
        assert_eq!(set.spin_all(&mut source), vec![0, 1, 2]);
        assert!(!set.all_settled());
        assert!((0..3).all(|i| set.stop_control_active(i)));
    }

    #[test]
    fn test_spin_all_skips_spinning_reels() {
        let mut source = ScriptedOutcomes::default();
        let mut set = classic_set(TimingConfig::manual());
        set.spin_all(&mut source);
        assert!(set.spin_all(&mut source).is_empty());
    }

    #[test]
    fn test_stop_rejections() {
        let mut source = ScriptedOutcomes::new(vec![Symbol::Bells]);
        let mut set = classic_set(TimingConfig::manual());

        // Controls are disarmed before the first spin
        assert_eq!(set.stop(0, &mut source), None);

        set.spin_all(&mut source);
        assert_eq!(set.stop(3, &mut source), None);
        assert_eq!(set.stop(1, &mut source), Some(Symbol::Bells));
        // Control disarmed after use
        assert!(!set.stop_control_active(1));
        assert_eq!(set.stop(1, &mut source), None);
        assert_eq!(source.draws(), 1);
    }

    #[test]
    fn test_collect_results_requires_settled() {
        let mut source = ScriptedOutcomes::new(vec![Symbol::Grapes, Symbol::Bananas, Symbol::Grapes]);
        let mut set = classic_set(TimingConfig::manual());

        // Idle reels have no result either
        assert!(matches!(
            set.collect_results(),
            Err(SlotError::InvalidState { .. })
        ));

        set.spin_all(&mut source);
        for i in 0..3 {
            set.stop(i, &mut source);
        }
        assert!(set.collect_results().is_err());

        let settled = tick_until_settled(&mut set, &mut source);
        assert_eq!(settled.len(), 3);
        assert_eq!(
            set.collect_results().unwrap(),
            vec![Symbol::Grapes, Symbol::Bananas, Symbol::Grapes]
        );
    }

    #[test]
    fn test_auto_stop_staggered() {
        let mut source = ScriptedOutcomes::new(vec![Symbol::Sevens]);
        let mut set = classic_set(TimingConfig::turbo());
        set.spin_all(&mut source);

        let mut stops = Vec::new();
        let mut ticks = 0;
        while !set.all_settled() {
            let out = set.tick(DT, &mut source);
            for (reel, _) in out.auto_stops {
                stops.push((reel, ticks));
            }
            ticks += 1;
            assert!(ticks < 60 * 30);
        }
        assert_eq!(stops.len(), 3);
        assert_eq!(stops.iter().map(|(r, _)| *r).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(stops[0].1 < stops[1].1 && stops[1].1 < stops[2].1);
        assert_eq!(set.collect_results().unwrap(), vec![Symbol::Sevens; 3]);
    }

    #[test]
    fn test_manual_timing_never_auto_stops() {
        let mut source = ScriptedOutcomes::default();
        let mut set = classic_set(TimingConfig::manual());
        set.spin_all(&mut source);
        for _ in 0..600 {
            assert!(set.tick(DT, &mut source).auto_stops.is_empty());
        }
        assert!(!set.all_settled());
    }

    #[test]
    fn test_reset_all() {
        let mut source = ScriptedOutcomes::default();
        let mut set = classic_set(TimingConfig::manual());
        set.spin_all(&mut source);
        set.stop(0, &mut source);

        set.reset_all(Some(&[1, 2, 3]), &mut source);
        assert!(set.all_settled());
        assert_eq!(set.states(), vec![ReelState::Idle; 3]);
        assert!((0..3).all(|i| !set.stop_control_active(i)));
        assert_eq!(
            set.displayed_symbols(),
            vec![Symbol::Grapes, Symbol::Bananas, Symbol::Oranges]
        );
    }

    #[test]
    fn test_invalid_reels_rejected() {
        let zero_tiles = ReelConfig {
            tile_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            ReelSet::new(3, zero_tiles, TimingConfig::manual()),
            Err(ConfigError::InvalidReel(_))
        ));
        assert!(ReelSet::new(0, ReelConfig::default(), TimingConfig::manual()).is_err());
    }

    #[test]
    fn test_reel_lookup() {
        let set = classic_set(TimingConfig::manual());
        assert!(set.reel(2).is_ok());
        assert!(matches!(
            set.reel(5),
            Err(SlotError::ReelIndex { index: 5, count: 3 })
        ));
    }
}
