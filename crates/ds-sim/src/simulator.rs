//! Batch simulator — many headless sessions in parallel

use std::time::Instant;

use ds_slot::{GameSession, SlotConfig, TimingConfig, TimingProfile};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::report::{SessionSummary, SimReport};

/// Plays `sessions × spins_per_session` rounds of one machine
pub struct BatchSimulator {
    machine: SlotConfig,
    config: SimConfig,
}

impl BatchSimulator {
    /// A machine left on manual stops is switched to studio timing, since
    /// nobody presses the stop controls in a batch run.
    pub fn new(mut machine: SlotConfig, config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        machine.validate().map_err(ds_slot::SlotError::from)?;
        if machine.timing.profile == TimingProfile::Manual {
            machine.timing = TimingConfig::studio();
        }
        Ok(Self { machine, config })
    }

    pub fn machine(&self) -> &SlotConfig {
        &self.machine
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// One seed per session, derived from the master seed
    pub fn session_seeds(master: u64, sessions: usize) -> Vec<u64> {
        let mut rng = ChaCha8Rng::seed_from_u64(master);
        (0..sessions).map(|_| rng.random()).collect()
    }

    pub fn run(&self) -> SimResult<SimReport> {
        let master = self
            .config
            .seed
            .unwrap_or_else(|| ChaCha8Rng::from_os_rng().random());
        let seeds = Self::session_seeds(master, self.config.sessions);
        let started = Instant::now();

        log::info!(
            "[Sim] {} sessions × {} spins, bet {}, seed {}",
            self.config.sessions,
            self.config.spins_per_session,
            self.config.bet,
            master
        );

        let play_all = || {
            seeds
                .par_iter()
                .enumerate()
                .map(|(index, &seed)| self.run_session(index, seed))
                .collect::<SimResult<Vec<_>>>()
        };

        let summaries = if self.config.threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()
                .map_err(|e| SimError::ThreadPool(e.to_string()))?
                .install(play_all)?
        } else {
            play_all()?
        };

        let report = SimReport::from_summaries(master, summaries);
        log::info!(
            "[Sim] done in {:.1} ms: {} spins, RTP {:.2}%, hit rate {:.2}%, {} jackpots",
            started.elapsed().as_secs_f64() * 1000.0,
            report.spins,
            report.rtp(),
            report.hit_rate(),
            report.jackpots
        );
        Ok(report)
    }

    /// Play one session to completion or until the balance cannot cover the bet
    pub fn run_session(&self, index: usize, seed: u64) -> SimResult<SessionSummary> {
        let mut session = GameSession::seeded(self.machine.clone(), seed)?;
        session.start()?;
        let step = session.frame_step();
        let bet = self.config.bet;
        let mut summary = SessionSummary::new(index, seed);

        for round_no in 0..self.config.spins_per_session {
            if session.balance() < bet {
                summary.busted = true;
                break;
            }
            session.set_bet(bet)?;
            session.start_spin()?;

            let mut ticks = 0;
            let round = loop {
                if let Some(round) = session.tick(step) {
                    break round;
                }
                ticks += 1;
                if ticks >= self.config.max_ticks_per_round {
                    return Err(SimError::Stalled {
                        session: index,
                        round: round_no,
                        ticks,
                    });
                }
            };
            // Stage events are for the view layer; a headless run drops them.
            session.drain_events();
            summary.record(&round);
        }

        summary.final_balance = session.balance();
        log::debug!(
            "[Sim] session {} finished: {} spins, balance {}",
            index,
            summary.spins,
            summary.final_balance
        );
        Ok(summary)
    }
}
