//! Simulation errors

use ds_slot::SlotError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("Session {session} stalled: round {round} did not settle within {ticks} ticks")]
    Stalled { session: usize, round: u64, ticks: u64 },

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Slot(#[from] SlotError),
}

pub type SimResult<T> = Result<T, SimError>;
