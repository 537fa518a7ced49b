//! Tick scheduler for the countdown.
//!
//! The scheduler owns at most one live recurring callback. The callback is a
//! spawned tokio task wrapped in a [`TickGuard`]; dropping the guard aborts
//! the task, so replacing or clearing the guard is the only way a callback
//! ends. Each guard carries a generation number and every fired tick is
//! tagged with it, which lets the receiver discard ticks that were already
//! queued when their callback was cancelled.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

use crate::types::TimerState;

/// Tick period.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A tick delivered by a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickFired {
    /// Generation of the callback that produced this tick
    pub generation: u64,
}

/// Ownership of one live recurring callback. Aborts the task on drop.
#[derive(Debug)]
struct TickGuard {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Drop for TickGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Schedules one-second ticks while the timer is running.
#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    tick_tx: mpsc::UnboundedSender<TickFired>,
    live: Option<TickGuard>,
    last_generation: u64,
}

impl TickScheduler {
    /// Creates a scheduler with a one-second period.
    pub fn new(tick_tx: mpsc::UnboundedSender<TickFired>) -> Self {
        Self {
            period: TICK_PERIOD,
            tick_tx,
            live: None,
            last_generation: 0,
        }
    }

    /// Reconciles the live callback with `state`.
    ///
    /// Always cancels the current callback, then arms a new one if the
    /// timer is running with time left. Must be called after every change
    /// to the running flag, the remaining time or the mode.
    ///
    /// Must be called from within a tokio runtime.
    pub fn sync(&mut self, state: &TimerState) {
        self.cancel();
        if state.wants_tick() {
            self.arm();
        }
    }

    /// Cancels the live callback, if any.
    pub fn cancel(&mut self) {
        if let Some(guard) = self.live.take() {
            debug!("Cancelling tick callback #{}", guard.generation);
        }
    }

    /// Returns true if `tick` came from the live callback.
    pub fn accepts(&self, tick: &TickFired) -> bool {
        self.live
            .as_ref()
            .is_some_and(|guard| guard.generation == tick.generation)
    }

    /// Returns true if a callback is currently scheduled.
    pub fn is_armed(&self) -> bool {
        self.live.is_some()
    }

    /// Generation of the live callback, if any.
    pub fn live_generation(&self) -> Option<u64> {
        self.live.as_ref().map(|guard| guard.generation)
    }

    fn arm(&mut self) {
        self.last_generation += 1;
        let generation = self.last_generation;
        let period = self.period;
        let tx = self.tick_tx.clone();

        let handle = tokio::spawn(async move {
            // The first tick is one full period away, not immediate.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if tx.send(TickFired { generation }).is_err() {
                    break;
                }
            }
        });

        debug!("Armed tick callback #{}", generation);
        self.live = Some(TickGuard { generation, handle });
    }
}

// ============================================================================
// Tests
// ============================================================================
