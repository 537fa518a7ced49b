//! Integration tests for the timer core.
//!
//! These tests drive the engine and scheduler together through the public
//! API on a paused tokio clock, so simulated minutes pass instantly:
//! - Full work and break intervals with cue selection
//! - Mid-countdown mode switches and resets
//! - Countdown bounds and session counting over several cycles

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

use focus_timer::sound::{AudioCue, MockCuePlayer};
use focus_timer::timer::{TickFired, TickScheduler, TimerController, TimerEngine, TimerEvent};
use focus_timer::types::{format_time, Mode, TimerState};

// ============================================================================
// Test Helpers
// ============================================================================

struct Session {
    controller: TimerController,
    mock: Arc<MockCuePlayer>,
    tick_rx: mpsc::UnboundedReceiver<TickFired>,
    event_rx: mpsc::UnboundedReceiver<TimerEvent>,
}

impl Session {
    fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let mock = Arc::new(MockCuePlayer::new());
        let engine = TimerEngine::new(mock.clone(), event_tx);

        Self {
            controller: TimerController::new(engine, TickScheduler::new(tick_tx)),
            mock,
            tick_rx,
            event_rx,
        }
    }

    fn state(&self) -> &TimerState {
        self.controller.state()
    }

    /// Applies `seconds` live ticks, checking the countdown bounds after each.
    async fn advance(&mut self, seconds: u32) {
        let mut applied = 0;
        while applied < seconds {
            let before = self.state().clone();
            let tick = self.tick_rx.recv().await.expect("tick channel closed");
            if !self.controller.handle_tick(tick) {
                continue;
            }
            applied += 1;

            let after = self.state();
            assert!(after.time_left() <= after.mode().duration_secs());
            assert!(after.sessions() >= before.sessions());
            if after.mode() == before.mode() {
                assert_eq!(after.time_left(), before.time_left() - 1);
                assert!(after.is_running());
            }
        }
    }

    fn events(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

// ============================================================================
// Full Intervals
// ============================================================================

#[tokio::test(start_paused = true)]
async fn work_interval_completes_into_break() {
    let mut session = Session::new();
    assert_eq!(session.state(), &TimerState::new());

    let started = Instant::now();
    session.controller.toggle_run();
    session.advance(1500).await;

    let state = session.state();
    assert_eq!(state.mode(), Mode::ShortBreak);
    assert_eq!(state.time_left(), 300);
    assert!(!state.is_running());
    assert_eq!(state.sessions(), 1);
    assert_eq!(session.mock.get_play_calls(), vec![AudioCue::WorkComplete]);
    assert_eq!(started.elapsed(), Duration::from_secs(1500));
}

#[tokio::test(start_paused = true)]
async fn break_interval_completes_into_work() {
    let mut session = Session::new();
    session.controller.toggle_run();
    session.advance(1500).await;
    session.mock.clear_calls();

    session.controller.toggle_run();
    session.advance(300).await;

    let state = session.state();
    assert_eq!(state.mode(), Mode::Work);
    assert_eq!(state.time_left(), 1500);
    assert!(!state.is_running());
    assert_eq!(state.sessions(), 1);
    assert_eq!(session.mock.get_play_calls(), vec![AudioCue::BreakComplete]);
}

#[tokio::test(start_paused = true)]
async fn cue_is_dispatched_before_mode_changes() {
    let mut session = Session::new();
    session.controller.toggle_run();
    session.advance(1500).await;

    let events = session.events();
    let cue_at = events
        .iter()
        .position(|e| matches!(e, TimerEvent::CueDispatched { .. }))
        .expect("cue dispatched");
    let switch_at = events
        .iter()
        .position(|e| matches!(e, TimerEvent::ModeSwitched { .. }))
        .expect("mode switched");

    assert!(cue_at < switch_at);
    assert_eq!(
        events[cue_at],
        TimerEvent::CueDispatched {
            cue: AudioCue::WorkComplete,
            mode: Mode::Work,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn completed_interval_stays_paused() {
    let mut session = Session::new();
    session.controller.toggle_run();
    session.advance(1500).await;

    assert!(!session.controller.is_ticking());
    tokio::time::sleep(Duration::from_secs(60)).await;

    while let Ok(tick) = session.tick_rx.try_recv() {
        assert!(!session.controller.handle_tick(tick));
    }
    assert_eq!(session.state().time_left(), 300);
}

// ============================================================================
// Manual Operations
// ============================================================================

#[tokio::test(start_paused = true)]
async fn switch_mode_mid_countdown() {
    let mut session = Session::new();
    session.controller.toggle_run();
    session.advance(500).await;
    assert_eq!(session.state().time_left(), 1000);

    session.controller.switch_mode(Mode::ShortBreak);

    let state = session.state();
    assert_eq!(state.mode(), Mode::ShortBreak);
    assert_eq!(state.time_left(), 300);
    assert!(!state.is_running());
    assert_eq!(state.sessions(), 0);
    assert_eq!(session.mock.play_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn reset_while_running() {
    let mut session = Session::new();
    session.controller.toggle_run();
    session.advance(1458).await;
    assert_eq!(session.state().time_left(), 42);

    session.controller.reset();

    let state = session.state();
    assert_eq!(state.mode(), Mode::Work);
    assert_eq!(state.time_left(), 1500);
    assert!(!state.is_running());
    assert!(!session.controller.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn switch_always_pauses() {
    let mut session = Session::new();

    for target in [Mode::ShortBreak, Mode::Work, Mode::Work, Mode::ShortBreak] {
        session.controller.toggle_run();
        session.advance(3).await;
        session.controller.switch_mode(target);

        assert!(!session.state().is_running());
        assert_eq!(session.state().time_left(), target.duration_secs());
        assert!(!session.controller.is_ticking());
    }
}

#[tokio::test(start_paused = true)]
async fn pause_and_resume_keeps_remaining_time() {
    let mut session = Session::new();
    session.controller.toggle_run();
    session.advance(10).await;

    session.controller.toggle_run();
    tokio::time::sleep(Duration::from_secs(30)).await;
    while let Ok(tick) = session.tick_rx.try_recv() {
        session.controller.handle_tick(tick);
    }
    assert_eq!(session.state().time_left(), 1490);

    session.controller.toggle_run();
    session.advance(1).await;
    assert_eq!(session.state().time_left(), 1489);
}

// ============================================================================
// Cycles
// ============================================================================

#[tokio::test(start_paused = true)]
async fn sessions_count_only_work_completions() {
    let mut session = Session::new();

    for cycle in 1..=3 {
        session.controller.toggle_run();
        session.advance(1500).await;
        assert_eq!(session.state().sessions(), cycle);

        session.controller.toggle_run();
        session.advance(300).await;
        assert_eq!(session.state().sessions(), cycle);
    }

    assert_eq!(
        session.mock.get_play_calls(),
        [AudioCue::WorkComplete, AudioCue::BreakComplete].repeat(3)
    );
}

#[test]
fn format_time_examples() {
    assert_eq!(format_time(65), "01:05");
    assert_eq!(format_time(5), "00:05");
    assert_eq!(format_time(1500), "25:00");
}
