//! Simulated reel — strip-backed stand-in for a rendered reel
//!
//! Lands on a random strip position after a settle delay. Used by the CLI
//! and anywhere a real animated reel is not available.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulationConfig;
use crate::error::ReelError;
use crate::reel::{Reel, ReelSpec};
use crate::symbols::{ReelStrip, SymbolId};

#[derive(Debug)]
struct SimulatedState {
    spinning: bool,
    position: usize,
    rng: StdRng,
}

/// Strip-backed reel with a timed settle
#[derive(Debug)]
pub struct SimulatedReel {
    spec: ReelSpec,
    strip: ReelStrip,
    settle: Duration,
    settle_jitter_ms: u64,
    state: Mutex<SimulatedState>,
}

impl SimulatedReel {
    /// Create a reel over an explicit strip
    pub fn new(spec: ReelSpec, strip: ReelStrip, settle: Duration, seed: u64) -> Self {
        Self {
            spec,
            strip,
            settle,
            settle_jitter_ms: 0,
            state: Mutex::new(SimulatedState {
                spinning: false,
                position: 0,
                rng: StdRng::seed_from_u64(seed),
            }),
        }
    }

    /// Create a reel with a generated strip
    ///
    /// Each reel derives its own stream from `seed` and its index, so a
    /// seeded manager is reproducible.
    pub fn from_config(spec: ReelSpec, config: &SimulationConfig, seed: u64) -> Self {
        let reel_seed = seed.wrapping_add(spec.index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = StdRng::seed_from_u64(reel_seed);
        let strip = ReelStrip::generate(spec.index, config.symbol_count, config.strip_length, &mut rng);

        let mut reel = Self::new(spec, strip, Duration::from_millis(config.settle_ms), reel_seed);
        reel.settle_jitter_ms = config.settle_jitter_ms;
        reel
    }

    pub fn spec(&self) -> &ReelSpec {
        &self.spec
    }

    pub fn strip(&self) -> &ReelStrip {
        &self.strip
    }

    pub fn is_spinning(&self) -> bool {
        self.state.lock().spinning
    }

    /// Current stop position on the strip
    pub fn position(&self) -> usize {
        self.state.lock().position
    }
}

#[async_trait]
impl Reel for SimulatedReel {
    fn start_spin(&self) {
        self.state.lock().spinning = true;
        log::trace!("[SimulatedReel] reel {} spinning", self.spec.index);
    }

    async fn stop_spin(&self) -> Result<(), ReelError> {
        let (target, settle) = {
            let mut state = self.state.lock();
            if !state.spinning {
                return Err(ReelError::NotSpinning);
            }
            let target = if self.strip.is_empty() {
                0
            } else {
                state.rng.random_range(0..self.strip.len())
            };
            let jitter = if self.settle_jitter_ms > 0 {
                state.rng.random_range(0..=self.settle_jitter_ms)
            } else {
                0
            };
            (target, self.settle + Duration::from_millis(jitter))
        };

        tokio::time::sleep(settle).await;

        let mut state = self.state.lock();
        state.position = target;
        state.spinning = false;
        log::trace!(
            "[SimulatedReel] reel {} settled at {} after {:?}",
            self.spec.index,
            target,
            settle
        );
        Ok(())
    }

    async fn active_symbol_ids(&self) -> Result<Vec<SymbolId>, ReelError> {
        let position = self.state.lock().position;
        Ok(self.strip.window(position, self.spec.symbols_per_reel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReelLayout;

    fn spec(index: usize) -> ReelSpec {
        ReelLayout::classic_3x3().reel_spec(index)
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_requires_spin() {
        let reel = SimulatedReel::new(spec(0), ReelStrip::new(0, vec![1, 2, 3]), Duration::ZERO, 1);
        assert_eq!(reel.stop_spin().await, Err(ReelError::NotSpinning));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settles_after_delay() {
        let reel = SimulatedReel::new(
            spec(0),
            ReelStrip::new(0, vec![1, 2, 3, 4, 5]),
            Duration::from_millis(400),
            9,
        );

        reel.start_spin();
        assert!(reel.is_spinning());

        let started = tokio::time::Instant::now();
        reel.stop_spin().await.unwrap();

        assert_eq!(started.elapsed().as_millis(), 400);
        assert!(!reel.is_spinning());

        let window = reel.active_symbol_ids().await.unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window, reel.strip().window(reel.position(), 3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_seeded_reels_repeat() {
        let config = SimulationConfig {
            seed: Some(5),
            ..SimulationConfig::default()
        };
        let a = SimulatedReel::from_config(spec(1), &config, 5);
        let b = SimulatedReel::from_config(spec(1), &config, 5);
        assert_eq!(a.strip(), b.strip());

        for reel in [&a, &b] {
            reel.start_spin();
            reel.stop_spin().await.unwrap();
        }
        assert_eq!(a.position(), b.position());
        assert_eq!(
            a.active_symbol_ids().await.unwrap(),
            b.active_symbol_ids().await.unwrap()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_jitter_bounds_settle_time() {
        let config = SimulationConfig {
            settle_ms: 300,
            settle_jitter_ms: 100,
            ..SimulationConfig::default()
        };
        let reel = SimulatedReel::from_config(spec(2), &config, 11);
        reel.start_spin();

        let started = tokio::time::Instant::now();
        reel.stop_spin().await.unwrap();
        let elapsed = started.elapsed().as_millis();

        assert!((300..=400).contains(&elapsed), "settled after {}ms", elapsed);
    }
}
