//! Simulation report

use std::collections::BTreeMap;

use ds_slot::{RoundResult, Symbol};
use serde::{Deserialize, Serialize};

/// Outcome of one simulated session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub index: usize,
    /// Seed the session generator was built from
    pub seed: u64,
    pub spins: u64,
    pub wagered: u64,
    pub won: u64,
    pub wins: u64,
    pub jackpots: u64,
    pub biggest_win: u64,
    pub final_balance: u64,
    /// Ran out of balance before playing every round
    pub busted: bool,
    /// Landed symbols, summed over every reel and round
    pub symbol_counts: BTreeMap<Symbol, u64>,
}

impl SessionSummary {
    pub fn new(index: usize, seed: u64) -> Self {
        Self {
            index,
            seed,
            ..Default::default()
        }
    }

    /// Fold one settled round into the summary
    pub fn record(&mut self, round: &RoundResult) {
        self.spins += 1;
        self.wagered += round.bet;
        self.won += round.payout;
        if round.is_win() {
            self.wins += 1;
        }
        if round.is_jackpot() {
            self.jackpots += 1;
        }
        self.biggest_win = self.biggest_win.max(round.payout);
        for symbol in &round.symbols {
            *self.symbol_counts.entry(*symbol).or_default() += 1;
        }
    }
}

/// Aggregate over every session of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimReport {
    pub seed: u64,
    pub sessions: usize,
    pub spins: u64,
    pub wagered: u64,
    pub won: u64,
    pub wins: u64,
    pub jackpots: u64,
    pub busted_sessions: usize,
    pub biggest_win: u64,
    /// Observed share of each symbol among all landed symbols
    pub symbol_frequencies: BTreeMap<Symbol, f64>,
    pub per_session: Vec<SessionSummary>,
}

impl SimReport {
    /// Aggregate summaries (expected in session order)
    pub fn from_summaries(seed: u64, per_session: Vec<SessionSummary>) -> Self {
        let mut counts: BTreeMap<Symbol, u64> = Symbol::ALL.iter().map(|&s| (s, 0)).collect();
        let mut report = Self {
            seed,
            sessions: per_session.len(),
            spins: 0,
            wagered: 0,
            won: 0,
            wins: 0,
            jackpots: 0,
            busted_sessions: 0,
            biggest_win: 0,
            symbol_frequencies: BTreeMap::new(),
            per_session: Vec::new(),
        };

        for summary in &per_session {
            report.spins += summary.spins;
            report.wagered += summary.wagered;
            report.won += summary.won;
            report.wins += summary.wins;
            report.jackpots += summary.jackpots;
            report.busted_sessions += usize::from(summary.busted);
            report.biggest_win = report.biggest_win.max(summary.biggest_win);
            for (symbol, count) in &summary.symbol_counts {
                *counts.entry(*symbol).or_default() += count;
            }
        }

        let landed: u64 = counts.values().sum();
        report.symbol_frequencies = counts
            .into_iter()
            .map(|(symbol, count)| {
                let freq = if landed > 0 {
                    count as f64 / landed as f64
                } else {
                    0.0
                };
                (symbol, freq)
            })
            .collect();
        report.per_session = per_session;
        report
    }

    /// Return to player (percent)
    pub fn rtp(&self) -> f64 {
        if self.wagered > 0 {
            (self.won as f64 / self.wagered as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Winning rounds (percent)
    pub fn hit_rate(&self) -> f64 {
        if self.spins > 0 {
            (self.wins as f64 / self.spins as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ds_slot::Paytable;

    fn round(symbols: Vec<Symbol>, bet: u64) -> RoundResult {
        let evaluation = Paytable::standard().evaluate(&symbols, bet);
        RoundResult {
            turn: 1,
            bet,
            payout: evaluation.line_win,
            symbols,
            evaluation,
            jackpot_award: 0,
        }
    }

    #[test]
    fn test_summary_record() {
        let mut summary = SessionSummary::new(0, 1);
        summary.record(&round(vec![Symbol::Grapes; 3], 2));
        summary.record(&round(vec![Symbol::Blanks, Symbol::Grapes, Symbol::Grapes], 2));

        assert_eq!(summary.spins, 2);
        assert_eq!(summary.wagered, 4);
        assert_eq!(summary.won, 18);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.symbol_counts[&Symbol::Grapes], 5);
        assert_eq!(summary.symbol_counts[&Symbol::Blanks], 1);
    }

    #[test]
    fn test_report_aggregates() {
        let mut a = SessionSummary::new(0, 1);
        a.record(&round(vec![Symbol::Grapes; 3], 1));
        let mut b = SessionSummary::new(1, 2);
        b.record(&round(vec![Symbol::Blanks; 3], 1));
        b.busted = true;

        let report = SimReport::from_summaries(9, vec![a, b]);
        assert_eq!(report.sessions, 2);
        assert_eq!(report.spins, 2);
        assert_eq!(report.busted_sessions, 1);
        assert_relative_eq!(report.rtp(), 450.0);
        assert_relative_eq!(report.hit_rate(), 50.0);
        assert_relative_eq!(report.symbol_frequencies[&Symbol::Grapes], 0.5);
        assert_relative_eq!(report.symbol_frequencies[&Symbol::Sevens], 0.0);
        assert_eq!(report.symbol_frequencies.len(), Symbol::COUNT);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_summaries(0, Vec::new());
        assert_eq!(report.rtp(), 0.0);
        assert_eq!(report.hit_rate(), 0.0);
        assert!(report.to_json().unwrap().contains("\"symbol_frequencies\""));
    }
}
