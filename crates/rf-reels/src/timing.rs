//! Stop cadence — delays between staggered reel stop signals

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timing profile for the stop cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay cadence
    Normal,
    /// Fast/Turbo mode
    Turbo,
    /// Studio mode (instant, for testing)
    Studio,
    /// Hand-tuned or scaled values
    Custom,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Stop signal cadence
///
/// Reel `i` is signalled, then the manager waits `delay_after(i)` before
/// signalling reel `i + 1`. No delay follows the last reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopTiming {
    /// Profile type
    #[serde(default)]
    pub profile: TimingProfile,

    /// Delay between consecutive reel stop signals (ms)
    pub reel_stop_interval_ms: u64,

    /// Per-reel override: delay after signalling reel `index` (ms)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub per_reel_interval_ms: BTreeMap<usize, u64>,
}

impl StopTiming {
    /// Normal gameplay cadence (250ms between stops)
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            reel_stop_interval_ms: 250,
            per_reel_interval_ms: BTreeMap::new(),
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            reel_stop_interval_ms: 100,
            per_reel_interval_ms: BTreeMap::new(),
        }
    }

    /// Studio mode (all reels signalled back to back)
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            reel_stop_interval_ms: 0,
            per_reel_interval_ms: BTreeMap::new(),
        }
    }

    /// Fixed interval, no overrides
    pub fn with_interval(interval_ms: u64) -> Self {
        Self {
            profile: TimingProfile::Custom,
            reel_stop_interval_ms: interval_ms,
            per_reel_interval_ms: BTreeMap::new(),
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Builder: override the delay following reel `index`
    pub fn override_after(mut self, index: usize, interval_ms: u64) -> Self {
        self.per_reel_interval_ms.insert(index, interval_ms);
        self.profile = TimingProfile::Custom;
        self
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| (ms as f64 * factor.max(0.0)).round() as u64;
        Self {
            profile: TimingProfile::Custom,
            reel_stop_interval_ms: scale(self.reel_stop_interval_ms),
            per_reel_interval_ms: self
                .per_reel_interval_ms
                .iter()
                .map(|(&index, &ms)| (index, scale(ms)))
                .collect(),
        }
    }

    /// Delay between the stop signal of reel `index` and reel `index + 1`
    pub fn delay_after(&self, index: usize, reel_count: usize) -> Option<Duration> {
        if !has_following_reel(index, reel_count) {
            return None;
        }
        let ms = self
            .per_reel_interval_ms
            .get(&index)
            .copied()
            .unwrap_or(self.reel_stop_interval_ms);
        Some(Duration::from_millis(ms))
    }

    /// Time from the first stop signal to the last one
    pub fn total_signal_span(&self, reel_count: usize) -> Duration {
        (0..reel_count)
            .filter_map(|index| self.delay_after(index, reel_count))
            .sum()
    }

    /// Check overrides against the reel count
    pub fn validate(&self, reel_count: usize) -> Result<(), ConfigError> {
        // The last reel has no following delay, so an override there is meaningless too
        if let Some(&index) = self
            .per_reel_interval_ms
            .keys()
            .find(|&&index| !has_following_reel(index, reel_count))
        {
            return Err(ConfigError::InvalidTiming(format!(
                "interval override after reel {} but only {} reels are configured",
                index, reel_count
            )));
        }
        Ok(())
    }
}

/// Is there a reel after `index`? (`index` may be any `usize` from a config file)
fn has_following_reel(index: usize, reel_count: usize) -> bool {
    index < reel_count.saturating_sub(1)
}

impl Default for StopTiming {
    fn default() -> Self {
        Self::normal()
    }
}
