//! Scripted reels for driving ReelManager on a paused clock

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use rf_reels::{Reel, ReelError, ReelManager, ReelManagerConfig, StopTiming, SymbolId};

/// What happened to which reel, and when
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Start,
    StopSignal,
    Settled,
    Query,
}

#[derive(Debug, Clone, Copy)]
pub struct Call {
    pub reel: usize,
    pub kind: CallKind,
    pub at: Instant,
}

/// Shared call log
#[derive(Clone)]
pub struct CallLog {
    origin: Instant,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn record(&self, reel: usize, kind: CallKind) {
        self.calls.lock().push(Call {
            reel,
            kind,
            at: Instant::now(),
        });
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.calls.lock().iter().filter(|c| c.kind == kind).count()
    }

    /// (reel, ms since log creation) for every call of `kind`, in call order
    pub fn times(&self, kind: CallKind) -> Vec<(usize, u128)> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| (c.reel, c.at.duration_since(self.origin).as_millis()))
            .collect()
    }

    /// Position of the first call of `kind` in the log
    pub fn first_index_of(&self, kind: CallKind) -> Option<usize> {
        self.calls.lock().iter().position(|c| c.kind == kind)
    }

    /// Position of the last call of `kind` in the log
    pub fn last_index_of(&self, kind: CallKind) -> Option<usize> {
        self.calls.lock().iter().rposition(|c| c.kind == kind)
    }
}

/// Reel with a fixed window, a scripted settle time and optional failures
pub struct ScriptedReel {
    index: usize,
    symbols: Vec<SymbolId>,
    settle: Duration,
    fail_stop: bool,
    fail_query: bool,
    log: CallLog,
}

impl ScriptedReel {
    pub fn new(index: usize, symbols: Vec<SymbolId>, log: &CallLog) -> Self {
        Self {
            index,
            symbols,
            settle: Duration::ZERO,
            fail_stop: false,
            fail_query: false,
            log: log.clone(),
        }
    }

    pub fn settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn fail_stop(mut self) -> Self {
        self.fail_stop = true;
        self
    }

    pub fn fail_query(mut self) -> Self {
        self.fail_query = true;
        self
    }
}

#[async_trait]
impl Reel for ScriptedReel {
    fn start_spin(&self) {
        self.log.record(self.index, CallKind::Start);
    }

    async fn stop_spin(&self) -> Result<(), ReelError> {
        self.log.record(self.index, CallKind::StopSignal);
        tokio::time::sleep(self.settle).await;
        if self.fail_stop {
            return Err(ReelError::Animation(format!("reel {} jammed", self.index)));
        }
        self.log.record(self.index, CallKind::Settled);
        Ok(())
    }

    async fn active_symbol_ids(&self) -> Result<Vec<SymbolId>, ReelError> {
        self.log.record(self.index, CallKind::Query);
        if self.fail_query {
            return Err(ReelError::SymbolQuery("viewport unavailable".into()));
        }
        Ok(self.symbols.clone())
    }
}

/// Manager over scripted reels with instant settle and the normal cadence
pub fn manager_with_windows(windows: Vec<Vec<SymbolId>>) -> (ReelManager, CallLog) {
    let log = CallLog::new();
    let reels = windows
        .into_iter()
        .enumerate()
        .map(|(index, symbols)| ScriptedReel::new(index, symbols, &log))
        .collect();
    (manager_with_reels(reels, StopTiming::normal()), log)
}

pub fn manager_with_reels(reels: Vec<ScriptedReel>, timing: StopTiming) -> ReelManager {
    let config = ReelManagerConfig::with_reels(reels.len(), 3).timing(timing);
    let reels = reels
        .into_iter()
        .map(|reel| Box::new(reel) as Box<dyn Reel>)
        .collect();
    match ReelManager::with_reels(config, reels) {
        Ok(manager) => manager,
        Err(err) => panic!("scripted manager rejected: {}", err),
    }
}
