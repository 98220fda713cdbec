//! Reel manager configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::reel::ReelSpec;
use crate::timing::StopTiming;

/// Stage events carry the reel index as a `u8`
pub const MAX_REELS: usize = u8::MAX as usize;

/// Reel layout: how many reels, how many visible rows, where they sit
///
/// Only reel construction consumes the geometry; the spin/stop logic never
/// looks at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelLayout {
    /// Number of reels (columns), fixed for the manager's lifetime
    pub number_of_reels: usize,
    /// Number of visible symbols per reel
    pub symbols_per_reel: usize,
    /// Horizontal distance between reel origins
    pub reel_width: f32,
    /// Height of one symbol cell
    pub symbol_height: f32,
    /// X of the reel container
    #[serde(default = "default_origin_x")]
    pub origin_x: f32,
    /// Y of the reel container
    #[serde(default = "default_origin_y")]
    pub origin_y: f32,
}

fn default_origin_x() -> f32 {
    314.0
}

fn default_origin_y() -> f32 {
    80.0
}

impl ReelLayout {
    /// Classic 3 reels × 3 rows
    pub fn classic_3x3() -> Self {
        Self {
            number_of_reels: 3,
            symbols_per_reel: 3,
            reel_width: 160.0,
            symbol_height: 150.0,
            origin_x: default_origin_x(),
            origin_y: default_origin_y(),
        }
    }

    /// Standard 5 reels × 3 rows
    pub fn standard_5x3() -> Self {
        Self {
            number_of_reels: 5,
            ..Self::classic_3x3()
        }
    }

    /// Construction parameters for reel `index`
    pub fn reel_spec(&self, index: usize) -> ReelSpec {
        ReelSpec {
            index,
            symbols_per_reel: self.symbols_per_reel,
            symbol_height: self.symbol_height,
            x: self.origin_x + index as f32 * self.reel_width,
            y: self.origin_y,
        }
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.number_of_reels * self.symbols_per_reel
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_reels == 0 {
            return Err(ConfigError::InvalidLayout(
                "number_of_reels must be at least 1".into(),
            ));
        }
        if self.number_of_reels > MAX_REELS {
            return Err(ConfigError::InvalidLayout(format!(
                "number_of_reels must not exceed {}, got {}",
                MAX_REELS, self.number_of_reels
            )));
        }
        if self.symbols_per_reel == 0 {
            return Err(ConfigError::InvalidLayout(
                "symbols_per_reel must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("reel_width", self.reel_width),
            ("symbol_height", self.symbol_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidLayout(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for ReelLayout {
    fn default() -> Self {
        Self::classic_3x3()
    }
}

/// Settings for strip-backed simulated reels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Distinct symbol ids on each strip (ids are `1..=symbol_count`)
    pub symbol_count: u32,
    /// Symbols per strip
    pub strip_length: usize,
    /// Settle animation length after a stop signal (ms)
    pub settle_ms: u64,
    /// Extra random settle time per reel, `0..=settle_jitter_ms` (ms)
    #[serde(default)]
    pub settle_jitter_ms: u64,
    /// RNG seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            symbol_count: 6,
            strip_length: 30,
            settle_ms: 400,
            settle_jitter_ms: 150,
            seed: None,
        }
    }
}

/// Complete reel manager configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReelManagerConfig {
    /// Reel layout
    #[serde(default)]
    pub layout: ReelLayout,
    /// Stop cadence
    #[serde(default)]
    pub timing: StopTiming,
    /// Simulated reel settings
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl ReelManagerConfig {
    /// Config with a given reel count and the default everything else
    pub fn with_reels(number_of_reels: usize, symbols_per_reel: usize) -> Self {
        Self {
            layout: ReelLayout {
                number_of_reels,
                symbols_per_reel,
                ..ReelLayout::default()
            },
            ..Self::default()
        }
    }

    /// Builder: replace the stop cadence
    pub fn timing(mut self, timing: StopTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Builder: replace the simulation settings
    pub fn simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Json(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.timing.validate(self.layout.number_of_reels)?;
        if self.simulation.symbol_count == 0 || self.simulation.strip_length == 0 {
            return Err(ConfigError::InvalidLayout(
                "simulation needs at least one symbol and a non-empty strip".into(),
            ));
        }
        Ok(())
    }
}
