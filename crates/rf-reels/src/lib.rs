//! # rf-reels — Reel Orchestration for FluxForge Slot Prototypes
//!
//! Drives a fixed, ordered set of independently spinning reels through a
//! synchronized start/stop cycle and reports which symbols ended up visible
//! on every reel.
//!
//! ## Architecture
//!
//! ```text
//! ReelManager
//!     │
//!     ├── ReelManagerConfig (layout, stop cadence, simulation)
//!     ├── Vec<Box<dyn Reel>>  (index order = stop order)
//!     └── SpinState  Idle → Spinning → Stopping → Idle
//!           │
//!           v
//!     stop_spin(): signal 0 ─250ms─ signal 1 ─250ms─ signal 2 ─ barrier
//!           │
//!           v
//!     check_victory(): ⋂ active symbols → SpinOutcome → StageEvent
//! ```

pub mod config;
pub mod error;
pub mod manager;
pub mod reel;
pub mod simulated;
pub mod symbols;
pub mod timing;
pub mod victory;

pub use config::*;
pub use error::*;
pub use manager::*;
pub use reel::*;
pub use simulated::*;
pub use symbols::*;
pub use timing::*;
pub use victory::*;
