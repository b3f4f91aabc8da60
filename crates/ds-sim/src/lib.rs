//! # ds-sim — DrumSlot batch simulation
//!
//! Runs many headless [`ds_slot::GameSession`]s in parallel with auto-stopping
//! reels and aggregates a [`SimReport`]. Every session draws from its own
//! generator, seeded from a master seed, so a given seed always reproduces the
//! same report regardless of thread count.

pub mod config;
pub mod error;
pub mod report;
pub mod simulator;

pub use config::*;
pub use error::*;
pub use report::*;
pub use simulator::*;
