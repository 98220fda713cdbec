//! StageTrace — The complete sequence of stage events for one spin cycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::StageEvent;
use crate::stage::{Stage, StageCategory};

/// A complete trace of stage events for one spin cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    /// Unique identifier for this trace
    pub trace_id: String,

    /// Spin cycle counter within the manager's lifetime
    #[serde(default)]
    pub spin_id: Option<u64>,

    /// All events in emission order
    pub events: Vec<StageEvent>,

    /// When this trace was recorded
    pub recorded_at: DateTime<Utc>,
}

impl StageTrace {
    /// Create a new empty trace
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            spin_id: None,
            events: Vec::new(),
            recorded_at: Utc::now(),
        }
    }

    /// Set spin ID
    pub fn with_spin(mut self, spin_id: u64) -> Self {
        self.spin_id = Some(spin_id);
        self
    }

    /// Add an event to the trace
    pub fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Get total duration in milliseconds
    pub fn duration_ms(&self) -> f64 {
        let first = self.events.first().map(|e| e.timestamp_ms).unwrap_or(0.0);
        let last = self.events.last().map(|e| e.timestamp_ms).unwrap_or(0.0);
        last - first
    }

    /// Get events by category
    pub fn events_by_category(&self, category: StageCategory) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.category() == category)
            .collect()
    }

    /// Get events by stage type name
    pub fn events_by_type(&self, type_name: &str) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.type_name() == type_name)
            .collect()
    }

    /// Check if trace contains a specific stage type
    pub fn has_stage(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.stage.type_name() == type_name)
    }

    /// Get all stop signal events
    pub fn reel_stop_signals(&self) -> Vec<&StageEvent> {
        self.events_by_type("reel_stop_signal")
    }

    /// Get all settle events
    pub fn reel_stops(&self) -> Vec<&StageEvent> {
        self.events_by_type("reel_stop")
    }

    /// The Victory/NoMatch stage of this cycle, if it got that far
    pub fn outcome(&self) -> Option<&Stage> {
        self.events
            .iter()
            .map(|e| &e.stage)
            .find(|s| matches!(s, Stage::Victory { .. } | Stage::NoMatch))
    }

    /// Validate the trace against the stop protocol for `reel_count` reels
    pub fn validate(&self, reel_count: usize) -> TraceValidation {
        let signals = self.reel_stop_signals();
        let stops = self.reel_stops();

        let signals_in_order = signals
            .iter()
            .enumerate()
            .all(|(i, e)| e.stage.reel_index() == Some(i as u8));

        let position = |type_name: &str| {
            self.events
                .iter()
                .position(|e| e.stage.type_name() == type_name)
        };
        let last_stop = self
            .events
            .iter()
            .rposition(|e| e.stage.type_name() == "reel_stop");
        let evaluated_after_all_stops = match (position("evaluate_wins"), last_stop) {
            (Some(eval), Some(stop)) => eval > stop,
            (Some(_), None) => reel_count == 0,
            _ => false,
        };

        TraceValidation {
            has_spin_start: self.has_stage("spin_start"),
            has_terminal: self.events.last().is_some_and(|e| e.stage.is_terminal()),
            reel_stop_signal_count: signals.len(),
            reel_stop_count: stops.len(),
            expected_reels: reel_count,
            signals_in_order,
            evaluated_after_all_stops,
        }
    }
}

/// Validation result for a trace
#[derive(Debug, Clone, Default)]
pub struct TraceValidation {
    pub has_spin_start: bool,
    pub has_terminal: bool,
    pub reel_stop_signal_count: usize,
    pub reel_stop_count: usize,
    pub expected_reels: usize,
    pub signals_in_order: bool,
    pub evaluated_after_all_stops: bool,
}

impl TraceValidation {
    /// Check if trace is a complete, well-ordered cycle
    pub fn is_valid(&self) -> bool {
        self.has_spin_start
            && self.has_terminal
            && self.reel_stop_signal_count == self.expected_reels
            && self.reel_stop_count == self.expected_reels
            && self.signals_in_order
            && self.evaluated_after_all_stops
    }

    /// Get list of warnings
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if !self.has_spin_start {
            warnings.push("Missing SPIN_START event");
        }
        if !self.has_terminal {
            warnings.push("Trace does not end in SPIN_END or SPIN_FAULTED");
        }
        if self.reel_stop_signal_count != self.expected_reels {
            warnings.push("Not every reel received a stop signal");
        }
        if self.reel_stop_count != self.expected_reels {
            warnings.push("Not every reel settled");
        }
        if !self.signals_in_order {
            warnings.push("Stop signals out of reel order");
        }
        if !self.evaluated_after_all_stops {
            warnings.push("EVALUATE_WINS before all reels settled");
        }

        warnings
    }
}
