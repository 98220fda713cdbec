//! # rf-stage — Spin Lifecycle Stages
//!
//! Canonical stages a reel cycle passes through, with timestamps measured
//! from the start of the cycle.
//!
//! ## Lifecycle
//!
//! ```text
//! SpinStart → ReelSpinning × N
//!     → (ReelStopSignal, delay) × N → ReelStop × N (any order)
//!     → EvaluateWins → Victory | NoMatch → SpinEnd
//! ```
//!
//! A cycle that hits a collaborator failure ends in `SpinFaulted` instead.

pub mod stage;
pub mod event;
pub mod trace;

pub use stage::*;
pub use event::*;
pub use trace::*;
