//! DrumSlot command line
//!
//! Usage:
//!   drumslot simulate           - Batch-simulate sessions, print a JSON report
//!   drumslot play               - Play rounds of one session, print the stage trace
//!   drumslot config             - Print the machine config
//!
//! `--config <file>` (JSON or YAML) replaces the classic machine for any command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use ds_sim::{BatchSimulator, SimConfig};
use ds_slot::{
    GameSession, GameState, OutcomeSource, ScriptedOutcomes, SlotConfig, Symbol, TimingConfig,
    TimingProfile,
};
use ds_stage::StageTrace;

#[derive(Parser)]
#[command(name = "drumslot", version, about = "DrumSlot machine simulator")]
struct Cli {
    /// Machine config file (.json, .yaml, .yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Batch-simulate many sessions in parallel
    Simulate {
        /// Number of sessions
        #[arg(short, long, default_value_t = 8)]
        sessions: usize,
        /// Rounds per session
        #[arg(long, default_value_t = 1_000)]
        spins: u64,
        /// Bet per round
        #[arg(short, long, default_value_t = 1)]
        bet: u64,
        /// Master seed
        #[arg(long)]
        seed: Option<u64>,
        /// Worker threads (0 = all cores)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,
        /// Omit per-session summaries from the report
        #[arg(long)]
        summary_only: bool,
        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Play rounds of a single session
    Play {
        /// Rounds to play
        #[arg(short, long, default_value_t = 5)]
        rounds: u64,
        /// Bet per round
        #[arg(short, long, default_value_t = 10)]
        bet: u64,
        /// Seed for the outcome generator
        #[arg(long)]
        seed: Option<u64>,
        /// Forced outcomes, drawn in order and repeated (e.g. sevens,sevens,bells)
        #[arg(long, value_delimiter = ',')]
        script: Vec<Symbol>,
        /// Auto-stop timing
        #[arg(long, value_enum, default_value_t = Profile::Turbo)]
        timing: Profile,
        /// Write the stage trace as JSON
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Print the machine config
    Config {
        #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Normal,
    Turbo,
    Studio,
}

impl From<Profile> for TimingProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Normal => TimingProfile::Normal,
            Profile::Turbo => TimingProfile::Turbo,
            Profile::Studio => TimingProfile::Studio,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let machine = load_machine(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            sessions,
            spins,
            bet,
            seed,
            threads,
            summary_only,
            output,
        } => {
            let mut config = SimConfig::default()
                .with_sessions(sessions)
                .with_spins(spins)
                .with_bet(bet)
                .with_threads(threads);
            config.seed = seed;
            simulate(machine, config, summary_only, output.as_deref())
        }
        Commands::Play {
            rounds,
            bet,
            seed,
            script,
            timing,
            trace,
        } => {
            let machine = machine.with_timing(TimingConfig::from_profile(timing.into()));
            let trace_out = if script.is_empty() {
                let session = match seed {
                    Some(seed) => GameSession::seeded(machine, seed)?,
                    None => GameSession::new(machine)?,
                };
                play(session, rounds, bet)?
            } else {
                let session = GameSession::with_source(machine, ScriptedOutcomes::new(script))?;
                play(session, rounds, bet)?
            };
            if let Some(path) = trace {
                fs::write(&path, trace_out.to_json()?)
                    .with_context(|| format!("Failed to write trace to {}", path.display()))?;
                println!("Trace written to {}", path.display());
            }
            Ok(())
        }
        Commands::Config { format } => {
            let text = match format {
                Format::Json => machine.to_json()?,
                Format::Yaml => machine.to_yaml()?,
            };
            println!("{}", text);
            Ok(())
        }
    }
}

fn load_machine(path: Option<&Path>) -> Result<SlotConfig> {
    match path {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("Failed to load machine config {}", path.display())),
        None => Ok(SlotConfig::classic()),
    }
}

fn simulate(machine: SlotConfig, config: SimConfig, summary_only: bool, output: Option<&Path>) -> Result<()> {
    let mut report = BatchSimulator::new(machine, config)?.run()?;
    if summary_only {
        report.per_session.clear();
    }
    let json = report.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "{} spins, RTP {:.2}%, hit rate {:.2}% -> {}",
                report.spins,
                report.rtp(),
                report.hit_rate(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn play<S: OutcomeSource>(mut session: GameSession<S>, rounds: u64, bet: u64) -> Result<StageTrace> {
    if bet == 0 {
        bail!("bet must be at least 1");
    }
    let step = session.frame_step();
    let mut trace = StageTrace::new("play");
    session.start()?;

    for _ in 0..rounds {
        if session.balance() < bet {
            println!("Balance {} cannot cover bet {}", session.balance(), bet);
            break;
        }
        session.set_bet(bet)?;
        session.start_spin()?;

        let mut round = None;
        while session.state() == GameState::Spinning {
            round = session.tick(step).or(round);
        }
        trace.extend(session.drain_events());

        let round = round.context("round ended without a result")?;
        let faces: Vec<_> = round.symbols.iter().map(|s| s.name()).collect();
        println!(
            "turn {:>3}  [{}]  x{:<3} pays {:<6} balance {}{}",
            round.turn,
            faces.join(" | "),
            round.evaluation.multiplier,
            round.payout,
            session.balance(),
            if round.is_jackpot() { "  JACKPOT" } else { "" }
        );
    }

    let stats = session.stats();
    println!(
        "{} turns, {} wins, {} losses, RTP {:.2}%",
        stats.turn_count,
        stats.win_count,
        stats.loss_count,
        stats.rtp()
    );
    Ok(trace)
}
