//! Reel Manager — spin/stop lifecycle across a fixed set of reels
//!
//! ## Stop protocol
//!
//! Reels are told to stop strictly in index order, with the configured
//! cadence elapsing between consecutive signals. Each reel's settle future is
//! polled from the moment it is signalled, so a slow settle never delays the
//! next signal. After the last signal the manager waits for every reel to
//! settle, then evaluates common symbols, then returns to idle.
//!
//! ## State
//!
//! `Idle → Spinning → Stopping → Idle`. `Stopping` doubles as the in-flight
//! guard: a second `stop_spin()` issued while a stop is running is a no-op.
//! The manager is back in `Idle` whenever `stop_spin()` returns, including on
//! reel failure, and also if the `stop_spin()` future is dropped early.

use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::future::try_join_all;
use futures_util::stream::{FuturesUnordered, StreamExt};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::time::Instant;

use rf_stage::{Stage, StageEvent, StagePayload, StageTrace};

use crate::config::ReelManagerConfig;
use crate::error::{ManagerError, ManagerResult};
use crate::reel::{Reel, ReelSpec};
use crate::simulated::SimulatedReel;
use crate::symbols::SymbolId;
use crate::victory::{SpinOutcome, SpinReport, VictoryCheck};

/// Spin lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinState {
    /// Ready for `start_spin()`
    Idle,
    /// Reels spinning, ready for `stop_spin()`
    Spinning,
    /// Stop sequence in flight
    Stopping,
}

/// Floor for the stage channel capacity
const MIN_STAGE_CAPACITY: usize = 256;

/// Stage channel capacity that holds a whole cycle (3 stages per reel + 4)
/// with headroom, so a subscriber draining after `stop_spin()` never lags.
fn stage_capacity(reel_count: usize) -> usize {
    (4 * reel_count + 8).max(MIN_STAGE_CAPACITY)
}

/// Clock and trace for the cycle in progress
struct Cycle {
    spin_id: u64,
    started: Instant,
    trace: StageTrace,
}

/// Coordinates a fixed, ordered collection of reels
pub struct ReelManager {
    /// Configuration
    config: ReelManagerConfig,
    /// Reels, index order = stop order
    reels: Vec<Box<dyn Reel>>,
    /// Spin lifecycle state
    state: Mutex<SpinState>,
    /// Current cycle (None while idle)
    cycle: Mutex<Option<Cycle>>,
    /// Trace of the most recently finished cycle
    last_trace: Mutex<Option<StageTrace>>,
    /// Cycles started so far
    spin_counter: AtomicU64,
    /// Stage event fan-out
    stage_tx: broadcast::Sender<StageEvent>,
}

impl ReelManager {
    /// Build a manager, creating each reel through `factory` in index order
    pub fn new<F>(config: ReelManagerConfig, mut factory: F) -> ManagerResult<Self>
    where
        F: FnMut(ReelSpec) -> Box<dyn Reel>,
    {
        config.validate()?;
        let reels = (0..config.layout.number_of_reels)
            .map(|index| factory(config.layout.reel_spec(index)))
            .collect();
        Ok(Self::assemble(config, reels))
    }

    /// Build a manager over already constructed reels
    pub fn with_reels(config: ReelManagerConfig, reels: Vec<Box<dyn Reel>>) -> ManagerResult<Self> {
        config.validate()?;
        if reels.len() != config.layout.number_of_reels {
            return Err(ManagerError::ReelCountMismatch {
                expected: config.layout.number_of_reels,
                actual: reels.len(),
            });
        }
        Ok(Self::assemble(config, reels))
    }

    /// Build a manager over strip-backed simulated reels
    pub fn simulated(config: ReelManagerConfig) -> ManagerResult<Self> {
        let simulation = config.simulation.clone();
        let seed = simulation.seed.unwrap_or_else(rand::random);
        Self::new(config, |spec| {
            Box::new(SimulatedReel::from_config(spec, &simulation, seed))
        })
    }

    fn assemble(config: ReelManagerConfig, reels: Vec<Box<dyn Reel>>) -> Self {
        let (stage_tx, _) = broadcast::channel(stage_capacity(reels.len()));
        log::debug!(
            "[ReelManager] created with {} reels ({} symbols each, {}ms stop interval)",
            reels.len(),
            config.layout.symbols_per_reel,
            config.timing.reel_stop_interval_ms
        );
        Self {
            config,
            reels,
            state: Mutex::new(SpinState::Idle),
            cycle: Mutex::new(None),
            last_trace: Mutex::new(None),
            spin_counter: AtomicU64::new(0),
            stage_tx,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &ReelManagerConfig {
        &self.config
    }

    pub fn reel_count(&self) -> usize {
        self.reels.len()
    }

    pub fn state(&self) -> SpinState {
        *self.state.lock()
    }

    /// True from `start_spin()` until `stop_spin()` has fully completed
    pub fn is_spinning(&self) -> bool {
        self.state() != SpinState::Idle
    }

    /// Number of cycles started so far
    pub fn spins_started(&self) -> u64 {
        self.spin_counter.load(Ordering::Relaxed)
    }

    /// Subscribe to stage events
    pub fn subscribe_stages(&self) -> broadcast::Receiver<StageEvent> {
        self.stage_tx.subscribe()
    }

    /// Trace of the most recently finished cycle
    pub fn last_trace(&self) -> Option<StageTrace> {
        self.last_trace.lock().clone()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start every reel spinning. No-op unless idle.
    pub fn start_spin(&self) {
        {
            let mut state = self.state.lock();
            if *state != SpinState::Idle {
                log::debug!("[ReelManager] start_spin ignored while {:?}", *state);
                return;
            }
            *state = SpinState::Spinning;
        }

        let spin_id = self.spin_counter.fetch_add(1, Ordering::Relaxed) + 1;
        *self.cycle.lock() = Some(Cycle {
            spin_id,
            started: Instant::now(),
            trace: StageTrace::new(format!("spin-{}", spin_id)).with_spin(spin_id),
        });

        self.emit(Stage::SpinStart);
        for (index, reel) in self.reels.iter().enumerate() {
            reel.start_spin();
            self.emit(Stage::ReelSpinning {
                reel_index: index as u8,
            });
        }
        log::debug!("[ReelManager] spin {} started", spin_id);
    }

    /// Stop the reels, wait for them to settle, evaluate common symbols.
    ///
    /// Returns `Ok(None)` without touching any reel unless the manager is
    /// spinning. A reel failure aborts the sequence and is returned; the
    /// manager is idle again either way.
    pub async fn stop_spin(&self) -> ManagerResult<Option<SpinReport>> {
        {
            let mut state = self.state.lock();
            if *state != SpinState::Spinning {
                log::debug!("[ReelManager] stop_spin ignored while {:?}", *state);
                return Ok(None);
            }
            *state = SpinState::Stopping;
        }
        let cycle_guard = CycleGuard { manager: self };

        let result = self.stop_and_evaluate().await;
        match &result {
            Ok(_) => self.emit(Stage::SpinEnd),
            Err(err) => {
                log::error!("[ReelManager] stop sequence aborted: {}", err);
                self.emit(Stage::SpinFaulted {
                    reel_index: err.reel_index().map(|index| index as u8),
                    reason: err.to_string(),
                });
            }
        }

        drop(cycle_guard);
        result.map(Some)
    }

    async fn stop_and_evaluate(&self) -> ManagerResult<SpinReport> {
        let stop_started = Instant::now();
        self.stop_all().await?;
        let VictoryCheck { outcome, grid } = self.check_victory().await?;

        Ok(SpinReport {
            spin_id: self.current_spin_id(),
            outcome,
            grid,
            stop_duration_ms: stop_started.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Staggered stop signals followed by a settle barrier
    async fn stop_all(&self) -> ManagerResult<()> {
        let reel_count = self.reels.len();
        let mut settling = FuturesUnordered::new();

        for (index, reel) in self.reels.iter().enumerate() {
            log::debug!("[ReelManager] stop signal -> reel {}", index);
            self.emit(Stage::ReelStopSignal {
                reel_index: index as u8,
            });
            settling.push(async move {
                reel.stop_spin()
                    .await
                    .map(|()| index)
                    .map_err(|source| ManagerError::Reel {
                        reel_index: index,
                        source,
                    })
            });

            let Some(delay) = self.config.timing.delay_after(index, reel_count) else {
                continue;
            };

            // Keep driving the reels already signalled while the cadence elapses
            let pause = tokio::time::sleep(delay);
            tokio::pin!(pause);
            loop {
                tokio::select! {
                    biased;
                    Some(settled) = settling.next() => self.on_settled(settled?),
                    () = &mut pause => break,
                }
            }
        }

        while let Some(settled) = settling.next().await {
            self.on_settled(settled?);
        }
        Ok(())
    }

    fn on_settled(&self, index: usize) {
        log::debug!("[ReelManager] reel {} settled", index);
        self.emit(Stage::ReelStop {
            reel_index: index as u8,
        });
    }

    /// Visible symbols of every reel, queried concurrently, in reel order
    pub async fn active_grid(&self) -> ManagerResult<Vec<Vec<SymbolId>>> {
        let queries = self.reels.iter().enumerate().map(|(index, reel)| async move {
            reel.active_symbol_ids()
                .await
                .map_err(|source| ManagerError::Reel {
                    reel_index: index,
                    source,
                })
        });
        try_join_all(queries).await
    }

    /// Evaluate which symbols are visible on every reel and report it
    ///
    /// Reads reel state only; never changes the spin state.
    pub async fn check_victory(&self) -> ManagerResult<VictoryCheck> {
        let grid = self.active_grid().await?;
        self.emit_with(
            Stage::EvaluateWins,
            StagePayload::new()
                .reel_grid(grid.clone())
                .spin_id(self.current_spin_id()),
        );

        let outcome = SpinOutcome::from_grid(&grid);
        match &outcome {
            SpinOutcome::Victory { symbols } => {
                log::info!("[ReelManager] Victory! Common symbols: {:?}", symbols)
            }
            SpinOutcome::NoMatch => log::info!("[ReelManager] No common symbols"),
        }
        self.emit(outcome.to_stage());

        Ok(VictoryCheck { outcome, grid })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STAGE EMISSION
    // ═══════════════════════════════════════════════════════════════════════════

    fn current_spin_id(&self) -> u64 {
        self.cycle
            .lock()
            .as_ref()
            .map(|cycle| cycle.spin_id)
            .unwrap_or_else(|| self.spins_started())
    }

    fn emit(&self, stage: Stage) {
        self.emit_with(stage, StagePayload::default());
    }

    fn emit_with(&self, stage: Stage, payload: StagePayload) {
        let event = {
            let mut cycle = self.cycle.lock();
            let timestamp_ms = cycle
                .as_ref()
                .map(|c| c.started.elapsed().as_secs_f64() * 1000.0)
                .unwrap_or(0.0);
            let event = StageEvent::with_payload(stage, timestamp_ms, payload);
            if let Some(cycle) = cycle.as_mut() {
                cycle.trace.push(event.clone());
            }
            event
        };
        // Nobody listening is fine
        let _ = self.stage_tx.send(event);
    }

    /// Back to idle; archive the cycle's trace
    fn finish_cycle(&self) {
        if let Some(cycle) = self.cycle.lock().take() {
            *self.last_trace.lock() = Some(cycle.trace);
        }
        *self.state.lock() = SpinState::Idle;
    }
}

/// Returns the manager to idle when the stop sequence ends, however it ends
struct CycleGuard<'a> {
    manager: &'a ReelManager,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.manager.finish_cycle();
    }
}
