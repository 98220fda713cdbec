//! StageEvent — A stage occurrence with metadata
//!
//! Wraps a Stage with timing and payload.

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// A stage event with full metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The canonical stage
    pub stage: Stage,

    /// Timestamp in milliseconds (from start of the spin cycle)
    pub timestamp_ms: f64,

    /// Additional payload data
    #[serde(default)]
    pub payload: StagePayload,
}

impl StageEvent {
    /// Create a new stage event
    pub fn new(stage: Stage, timestamp_ms: f64) -> Self {
        Self {
            stage,
            timestamp_ms,
            payload: StagePayload::default(),
        }
    }

    /// Create with payload
    pub fn with_payload(stage: Stage, timestamp_ms: f64, payload: StagePayload) -> Self {
        Self {
            stage,
            timestamp_ms,
            payload,
        }
    }

    /// Get stage type name
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}

/// Additional payload data for a stage event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagePayload {
    /// Active symbols per reel (reels × rows), as seen at evaluation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reel_grid: Option<Vec<Vec<u32>>>,

    /// Spin cycle counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spin_id: Option<u64>,
}

impl StagePayload {
    /// Create empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set reel grid
    pub fn reel_grid(mut self, grid: Vec<Vec<u32>>) -> Self {
        self.reel_grid = Some(grid);
        self
    }

    /// Builder: set spin id
    pub fn spin_id(mut self, spin_id: u64) -> Self {
        self.spin_id = Some(spin_id);
        self
    }
}
