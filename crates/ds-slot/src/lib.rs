//! # ds-slot — DrumSlot game core
//!
//! Frame-driven slot machine core: spinning drums, spin resolution and payout.
//! Rendering and input live outside this crate; the view layer only reads
//! which symbol each reel shows, the session snapshot, and the emitted stages.
//!
//! ## Architecture
//!
//! ```text
//! GameSession
//!     │
//!     ├── ReelSet ── ReelAnimator × N   (Idle → Spinning → Stopping → Settled)
//!     ├── OutcomeSource                  (weighted draw fixed at stop request)
//!     ├── Paytable                       (run-length-squared multiplier, jackpot rule)
//!     └── JackpotPool
//!           │
//!           v
//!     RoundResult + Vec<StageEvent>
//! ```

pub mod config;
pub mod error;
pub mod jackpot;
pub mod outcome;
pub mod paytable;
pub mod reel;
pub mod reel_set;
pub mod session;
pub mod symbols;
pub mod timing;

pub use config::*;
pub use error::*;
pub use jackpot::*;
pub use outcome::*;
pub use paytable::*;
pub use reel::*;
pub use reel_set::*;
pub use session::*;
pub use symbols::*;
pub use timing::*;
