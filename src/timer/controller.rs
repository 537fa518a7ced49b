//! Couples the engine with its tick scheduler.
//!
//! Every operation mutates the engine and then resynchronizes the
//! scheduler, so the live callback always matches the current state.

use tracing::trace;

use super::engine::TimerEngine;
use super::scheduler::{TickFired, TickScheduler};
use crate::types::{Mode, TimerState};

/// Engine plus scheduler, driven from a single event loop.
pub struct TimerController {
    engine: TimerEngine,
    scheduler: TickScheduler,
}

impl TimerController {
    /// Creates a controller. Nothing is scheduled until the timer runs.
    pub fn new(engine: TimerEngine, scheduler: TickScheduler) -> Self {
        Self { engine, scheduler }
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        self.engine.switch_mode(mode);
        self.resync();
    }

    pub fn toggle_run(&mut self) {
        self.engine.toggle_run();
        self.resync();
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.resync();
    }

    /// Applies a fired tick if it belongs to the live callback.
    ///
    /// Returns true if the tick was applied.
    pub fn handle_tick(&mut self, tick: TickFired) -> bool {
        if !self.scheduler.accepts(&tick) {
            trace!("Ignoring stale tick #{}", tick.generation);
            return false;
        }
        self.engine.tick();
        self.resync();
        true
    }

    /// Cancels any pending tick. Used on teardown.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
    }

    pub fn state(&self) -> &TimerState {
        self.engine.state()
    }

    /// Returns true if a tick callback is live.
    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_armed()
    }

    fn resync(&mut self) {
        self.scheduler.sync(self.engine.state());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;
    use tokio::time::Duration;

    use super::*;
    use crate::sound::{AudioCue, MockCuePlayer};
    use crate::timer::TimerEvent;

    struct Harness {
        controller: TimerController,
        mock: Arc<MockCuePlayer>,
        tick_rx: mpsc::UnboundedReceiver<TickFired>,
        _event_rx: mpsc::UnboundedReceiver<TimerEvent>,
    }

    impl Harness {
        fn new() -> Self {
            let (event_tx, event_rx) = mpsc::unbounded_channel();
            let (tick_tx, tick_rx) = mpsc::unbounded_channel();
            let mock = Arc::new(MockCuePlayer::new());
            let engine = TimerEngine::new(mock.clone(), event_tx);
            Self {
                controller: TimerController::new(engine, TickScheduler::new(tick_tx)),
                mock,
                tick_rx,
                _event_rx: event_rx,
            }
        }

        /// Delivers ticks until `seconds` have been applied.
        async fn run_for(&mut self, seconds: u32) {
            let mut applied = 0;
            while applied < seconds {
                let tick = self.tick_rx.recv().await.unwrap();
                if self.controller.handle_tick(tick) {
                    applied += 1;
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_work_interval() {
        let mut h = Harness::new();

        h.controller.toggle_run();
        assert!(h.controller.is_ticking());
        h.run_for(1500).await;

        let state = h.controller.state();
        assert_eq!(state.mode(), Mode::ShortBreak);
        assert_eq!(state.time_left(), 300);
        assert!(!state.is_running());
        assert_eq!(state.sessions(), 1);
        assert!(!h.controller.is_ticking());
        assert_eq!(h.mock.get_play_calls(), vec![AudioCue::WorkComplete]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_scheduling() {
        let mut h = Harness::new();

        h.controller.toggle_run();
        h.run_for(3).await;
        h.controller.toggle_run();

        assert!(!h.controller.is_ticking());
        tokio::time::sleep(Duration::from_secs(10)).await;

        while let Ok(tick) = h.tick_rx.try_recv() {
            assert!(!h.controller.handle_tick(tick));
        }
        assert_eq!(h.controller.state().time_left(), 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_discards_queued_tick() {
        let mut h = Harness::new();

        h.controller.toggle_run();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        // A tick is now queued but not yet applied.
        h.controller.switch_mode(Mode::ShortBreak);

        let queued = h.tick_rx.try_recv().unwrap();
        assert!(!h.controller.handle_tick(queued));
        assert_eq!(h.controller.state().time_left(), 300);
        assert!(!h.controller.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_queued_tick() {
        let mut h = Harness::new();

        h.controller.toggle_run();
        h.run_for(1458).await;
        tokio::time::sleep(Duration::from_millis(1100)).await;
        h.controller.reset();

        let queued = h.tick_rx.try_recv().unwrap();
        assert!(!h.controller.handle_tick(queued));

        let state = h.controller.state();
        assert_eq!(state.mode(), Mode::Work);
        assert_eq!(state.time_left(), 1500);
        assert!(!state.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels() {
        let mut h = Harness::new();

        h.controller.toggle_run();
        h.controller.shutdown();

        assert!(!h.controller.is_ticking());
    }
}
