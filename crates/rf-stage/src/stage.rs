//! Stage — The semantic phases of one reel spin cycle
//!
//! A Stage is NOT an animation and NOT a reel callback.
//! A Stage is the MEANING of a moment in the spin/stop/evaluate flow.

use serde::{Deserialize, Serialize};

/// Canonical spin cycle stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Spin initiated, start signals about to fan out
    SpinStart,

    /// Reel received its start signal
    ReelSpinning {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// Spin cycle complete, manager is idle again
    SpinEnd,

    /// Cycle aborted by a reel failure, manager is idle again
    SpinFaulted {
        /// Which reel failed (if known)
        #[serde(default)]
        reel_index: Option<u8>,
        /// Human-readable failure
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // REEL STOPS
    // ═══════════════════════════════════════════════════════════════════════
    /// Reel was told to stop (staggered, strictly in index order)
    ReelStopSignal {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    /// Reel finished its settle animation, visible symbols are final
    ReelStop {
        /// Which reel (0-indexed)
        reel_index: u8,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // OUTCOME
    // ═══════════════════════════════════════════════════════════════════════
    /// All reels settled, common symbols being evaluated
    EvaluateWins,

    /// At least one symbol is visible on every reel
    Victory {
        /// Common symbol ids (first-appearance order of reel 0)
        symbols: Vec<u32>,
    },

    /// No symbol is visible on every reel
    NoMatch,
}

impl Stage {
    /// Get the stage category for grouping
    pub fn category(&self) -> StageCategory {
        match self {
            Stage::SpinStart
            | Stage::ReelSpinning { .. }
            | Stage::SpinEnd
            | Stage::SpinFaulted { .. } => StageCategory::SpinLifecycle,

            Stage::ReelStopSignal { .. } | Stage::ReelStop { .. } => StageCategory::ReelStops,

            Stage::EvaluateWins | Stage::Victory { .. } | Stage::NoMatch => StageCategory::Outcome,
        }
    }

    /// Get a simple string name for this stage type
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SpinStart => "spin_start",
            Stage::ReelSpinning { .. } => "reel_spinning",
            Stage::SpinEnd => "spin_end",
            Stage::SpinFaulted { .. } => "spin_faulted",
            Stage::ReelStopSignal { .. } => "reel_stop_signal",
            Stage::ReelStop { .. } => "reel_stop",
            Stage::EvaluateWins => "evaluate_wins",
            Stage::Victory { .. } => "victory",
            Stage::NoMatch => "no_match",
        }
    }

    /// Reel index this stage refers to, if any
    pub fn reel_index(&self) -> Option<u8> {
        match self {
            Stage::ReelSpinning { reel_index }
            | Stage::ReelStopSignal { reel_index }
            | Stage::ReelStop { reel_index } => Some(*reel_index),
            Stage::SpinFaulted { reel_index, .. } => *reel_index,
            _ => None,
        }
    }

    /// Does this stage close a cycle?
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::SpinEnd | Stage::SpinFaulted { .. })
    }

    /// All known type names (for UI/filter listings)
    pub fn all_type_names() -> &'static [&'static str] {
        &[
            "spin_start",
            "reel_spinning",
            "reel_stop_signal",
            "reel_stop",
            "evaluate_wins",
            "victory",
            "no_match",
            "spin_end",
            "spin_faulted",
        ]
    }

    /// Check whether a string is a known stage type name
    pub fn is_valid_type_name(name: &str) -> bool {
        Self::all_type_names().contains(&name)
    }
}

/// Stage category for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageCategory {
    SpinLifecycle,
    ReelStops,
    Outcome,
}

impl StageCategory {
    /// Every category, in lifecycle order
    pub fn all() -> [StageCategory; 3] {
        [Self::SpinLifecycle, Self::ReelStops, Self::Outcome]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SpinLifecycle => "Spin Lifecycle",
            Self::ReelStops => "Reel Stops",
            Self::Outcome => "Outcome",
        }
    }
}
