//! # ds-stage — DrumSlot Stage System
//!
//! Defines the canonical stages a DrumSlot round passes through.
//! The game core emits stages; the view and audio layers react to them
//! and never inspect reel internals directly.
//!
//! ## Round flow
//!
//! ```text
//! SpinStart → ReelSpinningStart × N → ReelStopRequested/ReelStop × N
//!           → EvaluateWins → WinPresent [→ JackpotWin] | SpinLost → SpinEnd
//! ```

pub mod event;
pub mod stage;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use trace::*;
