//! Game session — wallet, bets, turn counters and the round lifecycle
//!
//! The session is the only owner of mutable game state. The host calls
//! [`GameSession::tick`] (or [`GameSession::advance`] with wall time) once per
//! frame; every state transition happens synchronously inside those calls:
//! reels advance first, then the settle check, then payout.

use std::fmt;

use ds_stage::{Stage, StageEvent};
use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::error::{SlotError, SlotResult};
use crate::jackpot::JackpotPool;
use crate::outcome::{OutcomeSource, RandomOutcomeGenerator};
use crate::paytable::{Evaluation, Paytable};
use crate::reel::ReelState;
use crate::reel_set::ReelSet;
use crate::symbols::Symbol;
use crate::timing::{FrameClock, TimingConfig};

/// Top-level machine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Welcome screen, only `start` is accepted
    #[default]
    Inactive,
    /// Waiting for bet adjustments or a spin
    Active,
    /// Reels in motion, bet committed
    Spinning,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Inactive => "inactive",
            GameState::Active => "active",
            GameState::Spinning => "spinning",
        };
        f.write_str(name)
    }
}

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub turn_count: u64,
    pub win_count: u64,
    pub loss_count: u64,
    pub total_bet: u64,
    pub total_win: u64,
    pub jackpots_won: u64,
    pub biggest_win: u64,
}

impl SessionStats {
    /// Return to player (percent)
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_win as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Winning rounds (percent)
    pub fn hit_rate(&self) -> f64 {
        let rounds = self.win_count + self.loss_count;
        if rounds > 0 {
            (self.win_count as f64 / rounds as f64) * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, round: &RoundResult) {
        if round.is_win() {
            self.win_count += 1;
        } else {
            self.loss_count += 1;
        }
        if round.jackpot_award > 0 {
            self.jackpots_won += 1;
        }
        self.total_win = self.total_win.saturating_add(round.payout);
        self.biggest_win = self.biggest_win.max(round.payout);
    }
}

/// Outcome of one settled round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Turn number (1-based)
    pub turn: u64,
    /// Bet committed at spin start
    pub bet: u64,
    /// Landed symbols in reel order
    pub symbols: Vec<Symbol>,
    pub evaluation: Evaluation,
    /// Jackpot pool paid on top of the line win
    pub jackpot_award: u64,
    /// Total credited to the balance
    pub payout: u64,
}

impl RoundResult {
    pub fn is_win(&self) -> bool {
        self.evaluation.is_win()
    }

    pub fn is_jackpot(&self) -> bool {
        self.evaluation.is_jackpot
    }
}

/// Read-only view for the display layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub balance: u64,
    pub current_bet: u64,
    pub jackpot: u64,
    pub turn_count: u64,
    pub win_count: u64,
    pub loss_count: u64,
    pub state: GameState,
    pub reel_states: Vec<ReelState>,
    /// Symbol facing the player on each reel
    pub displayed: Vec<Symbol>,
    /// Drum angles in degrees
    pub reel_angles: Vec<f64>,
}

/// Frame-driven game session
pub struct GameSession<S: OutcomeSource = RandomOutcomeGenerator> {
    config: SlotConfig,
    source: S,
    reels: ReelSet,
    paytable: Paytable,
    jackpot: JackpotPool,
    clock: FrameClock,
    state: GameState,
    balance: u64,
    current_bet: u64,
    /// Bet committed by the spin in flight
    spin_bet: u64,
    stats: SessionStats,
    last_round: Option<RoundResult>,
    /// Undelivered stage events
    events: Vec<StageEvent>,
    /// Session time (s), drives event timestamps
    elapsed_secs: f64,
}

impl GameSession<RandomOutcomeGenerator> {
    /// Session drawing from an OS-seeded generator
    pub fn new(config: SlotConfig) -> SlotResult<Self> {
        let source = RandomOutcomeGenerator::from_config(&config)?;
        Self::with_source(config, source)
    }

    /// Reproducible session
    pub fn seeded(config: SlotConfig, seed: u64) -> SlotResult<Self> {
        let source = RandomOutcomeGenerator::seeded(&config.weights, seed)?;
        Self::with_source(config, source)
    }
}

impl<S: OutcomeSource> GameSession<S> {
    /// Session drawing symbols and start faces from `source`
    pub fn with_source(config: SlotConfig, mut source: S) -> SlotResult<Self> {
        config.validate()?;
        let paytable = Paytable::from_config(&config)?;
        let jackpot = JackpotPool::from_config(&config.jackpot)?;
        let mut reels = ReelSet::from_config(&config)?;
        reels.reset_all(None, &mut source);

        log::info!(
            "[Session] created: {} reels, {} tiles, balance {}",
            config.reel_count,
            config.reel.tile_count,
            config.wallet.starting_balance
        );

        Ok(Self {
            clock: FrameClock::from_rate(config.frame_rate),
            balance: config.wallet.starting_balance,
            config,
            source,
            reels,
            paytable,
            jackpot,
            state: GameState::Inactive,
            current_bet: 0,
            spin_bet: 0,
            stats: SessionStats::default(),
            last_round: None,
            events: Vec::new(),
            elapsed_secs: 0.0,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PLAYER ACTIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Leave the welcome screen
    pub fn start(&mut self) -> SlotResult<()> {
        if self.state != GameState::Inactive {
            return Err(self.reject("start"));
        }
        self.state = GameState::Active;
        self.emit(Stage::SessionStart {
            balance: self.balance,
        });
        log::info!("[Session] started with balance {}", self.balance);
        Ok(())
    }

    /// Adjust the current bet by `delta`, keeping `0 <= bet <= balance`.
    /// Returns the new bet; a rejected change leaves the bet untouched.
    pub fn place_bet_delta(&mut self, delta: i64) -> SlotResult<u64> {
        if self.state != GameState::Active {
            return Err(self.reject("place_bet"));
        }
        let bet = i128::from(self.current_bet) + i128::from(delta);
        self.apply_bet(bet)
    }

    /// Set the current bet outright
    pub fn set_bet(&mut self, bet: u64) -> SlotResult<u64> {
        if self.state != GameState::Active {
            return Err(self.reject("place_bet"));
        }
        self.apply_bet(i128::from(bet))
    }

    /// Commit the current bet and spin every reel
    pub fn start_spin(&mut self) -> SlotResult<()> {
        if self.state != GameState::Active {
            return Err(self.reject("start_spin"));
        }
        let bet = self.current_bet;
        if bet == 0 || bet > self.balance {
            log::warn!("[Session] spin rejected: bet {} balance {}", bet, self.balance);
            return Err(SlotError::InvalidBet {
                bet: i128::from(bet),
                balance: self.balance,
            });
        }

        self.balance -= bet;
        self.spin_bet = bet;
        let contribution = self.jackpot.contribute(bet);
        self.stats.turn_count += 1;
        self.stats.total_bet = self.stats.total_bet.saturating_add(bet);

        let started = self.reels.spin_all(&mut self.source);
        self.state = GameState::Spinning;

        self.emit(Stage::SpinStart {
            bet,
            turn: self.stats.turn_count,
        });
        for index in started {
            self.emit(Stage::ReelSpinningStart {
                reel_index: index as u8,
            });
        }
        log::info!(
            "[Session] turn {} spinning: bet {}, jackpot +{} = {}",
            self.stats.turn_count,
            bet,
            contribution,
            self.jackpot.value()
        );
        Ok(())
    }

    /// Press the stop control of one reel. Only honoured while spinning.
    pub fn request_reel_stop(&mut self, index: usize) -> Option<Symbol> {
        if self.state != GameState::Spinning {
            log::warn!("[Session] stop on reel {} ignored while {}", index, self.state);
            return None;
        }
        let symbol = self.reels.stop(index, &mut self.source)?;
        self.emit(Stage::ReelStopRequested {
            reel_index: index as u8,
            symbol_id: symbol.id(),
        });
        Some(symbol)
    }

    /// Back to defaults: counters, wallet, bet, jackpot and reels.
    /// An inactive machine stays inactive; otherwise play resumes as Active.
    pub fn reset_session(&mut self) {
        self.restore_defaults();
        if self.state != GameState::Inactive {
            self.state = GameState::Active;
        }
        self.emit(Stage::SessionReset);
        log::info!("[Session] reset (state {})", self.state);
    }

    /// Reset everything and return to the welcome screen
    pub fn power_off(&mut self) {
        self.restore_defaults();
        self.state = GameState::Inactive;
        self.emit(Stage::PowerOff);
        log::info!("[Session] powered off");
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FRAME DRIVING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run one frame of `dt` seconds. Returns the round result on the frame
    /// the last reel settles.
    pub fn tick(&mut self, dt: f64) -> Option<RoundResult> {
        // Time never runs backwards; a bad frame interval counts as zero
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed_secs += dt;
        if self.state != GameState::Spinning {
            return None;
        }

        let out = self.reels.tick(dt, &mut self.source);
        for (index, symbol) in out.auto_stops {
            self.emit(Stage::ReelStopRequested {
                reel_index: index as u8,
                symbol_id: symbol.id(),
            });
        }
        for (index, symbol) in out.settled {
            self.emit(Stage::ReelStop {
                reel_index: index as u8,
                symbol_id: symbol.id(),
            });
        }

        if self.reels.all_settled() {
            self.settle_round()
        } else {
            None
        }
    }

    /// Feed wall time through the fixed-step clock. Returns the number of
    /// ticks run.
    pub fn advance(&mut self, elapsed_secs: f64) -> u32 {
        let steps = self.clock.advance(elapsed_secs);
        let step = self.clock.step();
        for _ in 0..steps {
            self.tick(step);
        }
        steps
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // READ SIDE
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            balance: self.balance,
            current_bet: self.current_bet,
            jackpot: self.jackpot.value(),
            turn_count: self.stats.turn_count,
            win_count: self.stats.win_count,
            loss_count: self.stats.loss_count,
            state: self.state,
            reel_states: self.reels.states(),
            displayed: self.reels.displayed_symbols(),
            reel_angles: self
                .reels
                .reels()
                .iter()
                .map(|r| r.get_current_angle())
                .collect(),
        }
    }

    /// Take every stage emitted since the last call
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending stage events
    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn jackpot(&self) -> &JackpotPool {
        &self.jackpot
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn last_round(&self) -> Option<&RoundResult> {
        self.last_round.as_ref()
    }

    pub fn reels(&self) -> &ReelSet {
        &self.reels
    }

    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Fixed tick length used by `advance`
    pub fn frame_step(&self) -> f64 {
        self.clock.step()
    }

    /// Session time in seconds
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Switch auto-stop timing; applies from the next spin
    pub fn set_timing(&mut self, timing: TimingConfig) {
        self.config.timing = timing.clone();
        self.reels.set_timing(timing);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNALS
    // ═══════════════════════════════════════════════════════════════════════════

    fn apply_bet(&mut self, bet: i128) -> SlotResult<u64> {
        let Some(bet) = u64::try_from(bet).ok().filter(|b| *b <= self.balance) else {
            log::warn!("[Session] bet {} rejected (balance {})", bet, self.balance);
            return Err(SlotError::InvalidBet {
                bet,
                balance: self.balance,
            });
        };
        let previous = self.current_bet;
        if bet != previous {
            self.current_bet = bet;
            self.emit(Stage::BetChanged { bet, previous });
        }
        Ok(bet)
    }

    fn settle_round(&mut self) -> Option<RoundResult> {
        let symbols = match self.reels.collect_results() {
            Ok(symbols) => symbols,
            Err(e) => {
                log::warn!("[Session] settle deferred: {}", e);
                return None;
            }
        };
        self.emit(Stage::EvaluateWins);

        let bet = self.spin_bet;
        let evaluation = self.paytable.evaluate(&symbols, bet);
        let jackpot_award = if evaluation.is_jackpot {
            self.jackpot.award()
        } else {
            0
        };
        let payout = evaluation.line_win.saturating_add(jackpot_award);
        self.balance = self.balance.saturating_add(payout);

        let round = RoundResult {
            turn: self.stats.turn_count,
            bet,
            symbols,
            evaluation,
            jackpot_award,
            payout,
        };
        self.stats.record(&round);

        if round.is_jackpot() {
            self.emit(Stage::JackpotWin {
                amount: jackpot_award,
            });
        }
        if round.is_win() {
            self.emit(Stage::WinPresent {
                win_amount: payout,
                multiplier: round.evaluation.multiplier,
            });
        } else {
            self.emit(Stage::SpinLost { bet });
        }
        self.emit(Stage::SpinEnd);

        log::info!(
            "[Session] turn {} settled {:?}: x{} pays {} (balance {})",
            round.turn,
            round.symbols,
            round.evaluation.multiplier,
            payout,
            self.balance
        );

        self.current_bet = 0;
        self.spin_bet = 0;
        self.state = GameState::Active;
        self.last_round = Some(round.clone());
        Some(round)
    }

    fn restore_defaults(&mut self) {
        self.balance = self.config.wallet.starting_balance;
        self.current_bet = 0;
        self.spin_bet = 0;
        self.stats = SessionStats::default();
        self.last_round = None;
        self.jackpot.reset();
        self.reels.reset_all(None, &mut self.source);
        self.clock.reset();
    }

    fn reject(&self, action: &'static str) -> SlotError {
        log::warn!("[Session] {} rejected while {}", action, self.state);
        SlotError::invalid_state(action, self.state)
    }

    fn emit(&mut self, stage: Stage) {
        self.events
            .push(StageEvent::new(stage, self.elapsed_secs * 1000.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ScriptedOutcomes;
    use Symbol::*;
    use approx::assert_relative_eq;

    const DT: f64 = 1.0 / 60.0;

    fn scripted(script: Vec<Symbol>, timing: TimingConfig) -> GameSession<ScriptedOutcomes> {
        let config = SlotConfig::classic().with_timing(timing);
        GameSession::with_source(config, ScriptedOutcomes::new(script)).unwrap()
    }

    fn run_round<S: OutcomeSource>(session: &mut GameSession<S>) -> RoundResult {
        for _ in 0..60 * 30 {
            if let Some(round) = session.tick(DT) {
                return round;
            }
        }
        panic!("round did not settle");
    }

    fn play(session: &mut GameSession<ScriptedOutcomes>, bet: u64) -> RoundResult {
        session.set_bet(bet).unwrap();
        session.start_spin().unwrap();
        run_round(session)
    }

    #[test]
    fn test_boot_defaults() {
        let session = GameSession::seeded(SlotConfig::default(), 7).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.state, GameState::Inactive);
        assert_eq!(snap.balance, 1000);
        assert_eq!(snap.jackpot, 5000);
        assert_eq!(snap.current_bet, 0);
        assert_eq!(snap.reel_states, vec![ReelState::Idle; 3]);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = SlotConfig::classic();
        config.weights.insert(Sevens, 4);
        assert!(matches!(
            GameSession::new(config),
            Err(SlotError::Config(_))
        ));
    }

    #[test]
    fn test_only_start_from_inactive() {
        let mut session = scripted(vec![], TimingConfig::studio());
        assert!(matches!(
            session.place_bet_delta(10),
            Err(SlotError::InvalidState { .. })
        ));
        assert!(session.start_spin().is_err());
        session.start().unwrap();
        assert!(session.start().is_err());
        assert_eq!(session.state(), GameState::Active);
    }

    #[test]
    fn test_bet_over_balance_rejected() {
        let mut session = scripted(vec![], TimingConfig::studio());
        session.start().unwrap();
        assert_eq!(session.place_bet_delta(50).unwrap(), 50);

        assert!(matches!(
            session.place_bet_delta(951),
            Err(SlotError::InvalidBet { bet: 1001, balance: 1000 })
        ));
        assert!(session.place_bet_delta(-51).is_err());
        assert_eq!(session.current_bet(), 50);
        assert_eq!(session.balance(), 1000);

        assert_eq!(session.place_bet_delta(-50).unwrap(), 0);
    }

    #[test]
    fn test_zero_bet_spin_rejected() {
        let mut session = scripted(vec![], TimingConfig::studio());
        session.start().unwrap();
        assert!(matches!(
            session.start_spin(),
            Err(SlotError::InvalidBet { bet: 0, .. })
        ));
        assert_eq!(session.state(), GameState::Active);
        assert_eq!(session.stats().turn_count, 0);
    }

    #[test]
    fn test_losing_round() {
        let mut session = scripted(vec![Blanks, Grapes, Grapes], TimingConfig::studio());
        session.start().unwrap();
        session.set_bet(10).unwrap();
        session.start_spin().unwrap();

        assert_eq!(session.state(), GameState::Spinning);
        assert_eq!(session.balance(), 990);
        assert_eq!(session.jackpot().value(), 5001);
        assert_eq!(session.current_bet(), 10);

        let round = run_round(&mut session);
        assert_eq!(round.symbols, vec![Blanks, Grapes, Grapes]);
        assert_eq!(round.payout, 0);
        assert_eq!(session.balance(), 990);
        assert_eq!(session.stats().loss_count, 1);
        assert_eq!(session.stats().win_count, 0);
        assert_eq!(session.stats().turn_count, 1);
        assert_eq!(session.current_bet(), 0);
        assert_eq!(session.state(), GameState::Active);
    }

    #[test]
    fn test_winning_round() {
        let mut session = scripted(vec![Grapes], TimingConfig::studio());
        session.start().unwrap();
        let round = play(&mut session, 10);

        assert_eq!(round.evaluation.multiplier, 9);
        assert_eq!(round.payout, 90);
        assert_eq!(session.balance(), 1080);
        assert_eq!(session.stats().win_count, 1);
        assert_eq!(session.last_round(), Some(&round));
    }

    #[test]
    fn test_jackpot_pays_pool() {
        let mut session = scripted(vec![Sevens], TimingConfig::studio());
        session.start().unwrap();
        let round = play(&mut session, 100);

        assert!(round.is_jackpot());
        assert_eq!(round.jackpot_award, 5010);
        assert_eq!(round.payout, 100 * 90 + 5010);
        assert_eq!(session.balance(), 900 + 9000 + 5010);
        assert_eq!(session.jackpot().value(), 5000);
        assert_eq!(session.stats().jackpots_won, 1);
    }

    #[test]
    fn test_manual_stops() {
        let mut session = scripted(vec![Bells, Bells, Bars], TimingConfig::manual());
        session.start().unwrap();
        session.set_bet(5).unwrap();

        assert_eq!(session.request_reel_stop(0), None);
        session.start_spin().unwrap();

        for _ in 0..120 {
            assert!(session.tick(DT).is_none());
        }
        assert_eq!(session.request_reel_stop(2), Some(Bells));
        assert_eq!(session.request_reel_stop(2), None);
        assert_eq!(session.request_reel_stop(7), None);
        assert_eq!(session.request_reel_stop(0), Some(Bells));
        assert_eq!(session.request_reel_stop(1), Some(Bars));

        let round = run_round(&mut session);
        assert_eq!(round.symbols, vec![Bells, Bars, Bells]);
        assert_eq!(round.evaluation.multiplier, 6 + 5 + 6);
        assert_eq!(session.balance(), 995 + 5 * 17);
    }

    #[test]
    fn test_reset_mid_spin() {
        let mut session = scripted(vec![Grapes], TimingConfig::manual());
        session.start().unwrap();
        session.set_bet(100).unwrap();
        session.start_spin().unwrap();
        session.tick(DT);

        session.reset_session();
        let snap = session.snapshot();
        assert_eq!(snap.state, GameState::Active);
        assert_eq!(snap.balance, 1000);
        assert_eq!(snap.jackpot, 5000);
        assert_eq!(snap.turn_count, 0);
        assert_eq!(snap.current_bet, 0);
        assert_eq!(snap.reel_states, vec![ReelState::Idle; 3]);
        assert_eq!(session.request_reel_stop(0), None);
        assert!(session.last_round().is_none());
    }

    #[test]
    fn test_reset_keeps_inactive() {
        let mut session = scripted(vec![], TimingConfig::studio());
        session.reset_session();
        assert_eq!(session.state(), GameState::Inactive);
    }

    #[test]
    fn test_power_off() {
        let mut session = scripted(vec![Grapes], TimingConfig::studio());
        session.start().unwrap();
        play(&mut session, 10);
        session.power_off();

        assert_eq!(session.state(), GameState::Inactive);
        assert_eq!(session.balance(), 1000);
        assert_eq!(session.stats(), &SessionStats::default());
        let events = session.drain_events();
        assert_eq!(events.last().map(|e| e.type_name()), Some("power_off"));
    }

    #[test]
    fn test_round_events() {
        let mut session = scripted(vec![Grapes, Bananas, Oranges], TimingConfig::studio());
        session.start().unwrap();
        play(&mut session, 10);

        let events = session.drain_events();
        let names: Vec<_> = events.iter().map(|e| e.type_name()).collect();
        assert_eq!(names[0], "session_start");
        assert_eq!(names[1], "bet_changed");
        assert_eq!(names[2], "spin_start");
        assert_eq!(names.iter().filter(|n| **n == "reel_spinning_start").count(), 3);
        assert_eq!(names.iter().filter(|n| **n == "reel_stop_requested").count(), 3);
        assert_eq!(names.iter().filter(|n| **n == "reel_stop").count(), 3);
        assert_eq!(
            &names[names.len() - 3..],
            &["evaluate_wins", "win_present", "spin_end"]
        );
        assert!(events.windows(2).all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_advance_runs_fixed_ticks() {
        let mut session = scripted(vec![Cherries], TimingConfig::studio());
        session.start().unwrap();
        session.set_bet(1).unwrap();
        session.start_spin().unwrap();

        let mut ticks = 0;
        while session.state() == GameState::Spinning {
            ticks += session.advance(0.05);
            assert!(ticks < 60 * 30);
        }
        assert_eq!(session.stats().win_count, 1);
        assert_eq!(session.last_round().map(|r| r.evaluation.multiplier), Some(36));
    }

    #[test]
    fn test_bad_frame_intervals_are_ignored() {
        let mut session = scripted(vec![Grapes], TimingConfig::manual());
        session.start().unwrap();
        session.set_bet(1).unwrap();
        session.start_spin().unwrap();
        session.tick(DT);
        session.request_reel_stop(0);

        let angle = session.reels().reels()[0].get_current_angle();
        let elapsed = session.elapsed_secs();
        for dt in [-1.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            assert!(session.tick(dt).is_none());
        }
        assert_eq!(session.reels().reels()[0].get_current_angle(), angle);
        assert_eq!(session.elapsed_secs(), elapsed);
        assert_eq!(session.reels().states()[0], ReelState::Stopping);
    }

    #[test]
    fn test_stats_rates() {
        let stats = SessionStats {
            win_count: 1,
            loss_count: 3,
            total_bet: 200,
            total_win: 150,
            ..Default::default()
        };
        assert_relative_eq!(stats.rtp(), 75.0);
        assert_relative_eq!(stats.hit_rate(), 25.0);
        assert_eq!(SessionStats::default().rtp(), 0.0);
    }
}
