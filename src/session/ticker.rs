//! One-second ticker driving the countdown.
//!
//! Every `arm` starts a new generation. Ticks carry the generation that
//! produced them so the engine can drop ticks that were already queued
//! when the ticker was disarmed or re-armed.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A tick delivered to the session engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Generation of the arm that produced this tick
    pub generation: u64,
}

/// Periodic tick source.
pub trait Ticker {
    /// Starts ticking, replacing any previous arm.
    fn arm(&mut self);

    /// Stops ticking. No tick of the current generation is produced after
    /// this returns.
    fn disarm(&mut self);

    /// Returns true while armed.
    fn is_armed(&self) -> bool;

    /// Generation of the current (or last) arm.
    fn generation(&self) -> u64;
}

// ============================================================================
// TokioTicker
// ============================================================================

/// Ticker backed by a spawned tokio task.
///
/// Must be armed from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTicker {
    period: Duration,
    tick_tx: mpsc::UnboundedSender<Tick>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl TokioTicker {
    /// Creates a ticker with the one-second period.
    pub fn new(tick_tx: mpsc::UnboundedSender<Tick>) -> Self {
        Self::with_period(tick_tx, TICK_PERIOD)
    }

    /// Creates a ticker with a custom period.
    pub fn with_period(tick_tx: mpsc::UnboundedSender<Tick>, period: Duration) -> Self {
        Self {
            period,
            tick_tx,
            generation: 0,
            task: None,
        }
    }
}

impl Ticker for TokioTicker {
    fn arm(&mut self) {
        self.disarm();
        self.generation += 1;

        let generation = self.generation;
        let period = self.period;
        let tick_tx = self.tick_tx.clone();

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tick_tx.send(Tick { generation }).is_err() {
                    debug!("Tick receiver closed, ticker task exiting");
                    break;
                }
            }
        }));

        debug!("Ticker armed (generation {})", generation);
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Ticker disarmed (generation {})", self.generation);
        }
    }

    fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.disarm();
    }
}

// ============================================================================
// MockTicker
// ============================================================================

#[derive(Debug, Default)]
struct MockTickerInner {
    armed: bool,
    generation: u64,
    arm_count: usize,
    disarm_count: usize,
}

/// Mock ticker for testing; ticks are fed to the engine by hand.
///
/// Clones share the same recording.
#[derive(Debug, Default, Clone)]
pub struct MockTicker {
    inner: Arc<Mutex<MockTickerInner>>,
}

impl MockTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a tick of the current generation.
    #[must_use]
    pub fn current_tick(&self) -> Tick {
        Tick {
            generation: self.inner.lock().unwrap().generation,
        }
    }

    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.inner.lock().unwrap().arm_count
    }

    /// Number of disarms that actually stopped an armed ticker.
    #[must_use]
    pub fn disarm_count(&self) -> usize {
        self.inner.lock().unwrap().disarm_count
    }
}

impl Ticker for MockTicker {
    fn arm(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.armed = true;
        inner.generation += 1;
        inner.arm_count += 1;
    }

    fn disarm(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.armed {
            inner.armed = false;
            inner.disarm_count += 1;
        }
    }

    fn is_armed(&self) -> bool {
        self.inner.lock().unwrap().armed
    }

    fn generation(&self) -> u64 {
        self.inner.lock().unwrap().generation
    }
}
