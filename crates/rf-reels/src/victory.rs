//! Victory detection — symbols visible on every reel

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use rf_stage::Stage;

use crate::symbols::SymbolId;

/// Intersect every reel's visible symbols, treating each reel as a set.
///
/// Duplicates inside one reel count once. The result lists each common value
/// once, in the order it first appears on reel 0. Zero reels, or any reel with
/// nothing visible, yield an empty result.
pub fn find_common_symbols<T>(reels: &[Vec<T>]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let Some((first, rest)) = reels.split_first() else {
        return Vec::new();
    };

    let mut seen = HashSet::with_capacity(first.len());
    let mut common: Vec<T> = first
        .iter()
        .filter(|symbol| seen.insert(*symbol))
        .cloned()
        .collect();

    for reel in rest {
        if common.is_empty() {
            break;
        }
        let current: HashSet<&T> = reel.iter().collect();
        common.retain(|symbol| current.contains(symbol));
    }

    common
}

/// Outcome of one evaluated spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpinOutcome {
    /// These symbols are visible on every reel
    Victory { symbols: Vec<SymbolId> },
    /// No symbol is shared by all reels
    NoMatch,
}

impl SpinOutcome {
    /// Evaluate a reels × rows grid
    pub fn from_grid(grid: &[Vec<SymbolId>]) -> Self {
        let symbols = find_common_symbols(grid);
        if symbols.is_empty() {
            Self::NoMatch
        } else {
            Self::Victory { symbols }
        }
    }

    pub fn is_victory(&self) -> bool {
        matches!(self, Self::Victory { .. })
    }

    /// Common symbols (empty on NoMatch)
    pub fn symbols(&self) -> &[SymbolId] {
        match self {
            Self::Victory { symbols } => symbols,
            Self::NoMatch => &[],
        }
    }

    /// The stage announcing this outcome
    pub fn to_stage(&self) -> Stage {
        match self {
            Self::Victory { symbols } => Stage::Victory {
                symbols: symbols.clone(),
            },
            Self::NoMatch => Stage::NoMatch,
        }
    }
}

/// Result of one common-symbol evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryCheck {
    pub outcome: SpinOutcome,
    /// Visible symbols per reel, in reel order
    pub grid: Vec<Vec<SymbolId>>,
}

/// Everything a completed stop cycle produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinReport {
    /// Spin cycle counter
    pub spin_id: u64,
    /// Victory or no match
    pub outcome: SpinOutcome,
    /// Visible symbols per reel, in reel order
    pub grid: Vec<Vec<SymbolId>>,
    /// From first stop signal to outcome (ms)
    pub stop_duration_ms: f64,
}

impl SpinReport {
    pub fn is_victory(&self) -> bool {
        self.outcome.is_victory()
    }
}
