//! Timer engine for the focus timer.
//!
//! This module provides the core state machine:
//! - Mode switching (always pauses and resets the countdown)
//! - Run/pause toggling and reset
//! - One-second countdown steps with completion handling
//! - Cue dispatch and session counting on natural completion

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::sound::{AudioCue, CuePlayer};
use crate::types::{Mode, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for the display and external observers.
///
/// Events are sent in the order the engine performs the corresponding
/// steps, so a `CueDispatched` always precedes the `ModeSwitched` of the
/// same completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Mode being counted down
        mode: Mode,
    },
    /// Countdown paused by the user
    Paused {
        /// Mode being counted down
        mode: Mode,
    },
    /// Countdown reset within the same mode
    Reset {
        /// Mode that was reset
        mode: Mode,
    },
    /// Mode changed (manually or by completion)
    ModeSwitched {
        /// The new mode
        mode: Mode,
    },
    /// One second elapsed (tick)
    Tick {
        /// Remaining seconds
        time_left: u32,
    },
    /// A completion cue was requested
    CueDispatched {
        /// The cue that was requested
        cue: AudioCue,
        /// Mode that was active when the cue was requested
        mode: Mode,
    },
    /// A work interval completed
    WorkCompleted {
        /// Total completed sessions
        sessions: u32,
    },
    /// A short break completed
    BreakCompleted,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the timer state.
///
/// All mutation goes through [`switch_mode`](Self::switch_mode),
/// [`toggle_run`](Self::toggle_run), [`reset`](Self::reset) and
/// [`tick`](Self::tick).
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Completion cue output
    player: Arc<dyn CuePlayer>,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new TimerEngine in the initial state.
    pub fn new(player: Arc<dyn CuePlayer>, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(),
            player,
            event_tx,
        }
    }

    /// Switches to `mode`, discarding any remaining time. Never auto-starts.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.state.switch_to(mode);
        debug!("Switched to {}", mode);
        self.emit(TimerEvent::ModeSwitched { mode });
    }

    /// Flips between running and paused.
    ///
    /// Starting with no time left is accepted, but nothing will tick.
    pub fn toggle_run(&mut self) {
        self.state.is_running = !self.state.is_running;
        let mode = self.state.mode;

        if self.state.is_running {
            debug!("Countdown started ({} left)", self.state.time_left);
            self.emit(TimerEvent::Started { mode });
        } else {
            debug!("Countdown paused ({} left)", self.state.time_left);
            self.emit(TimerEvent::Paused { mode });
        }
    }

    /// Stops the countdown and restores the full duration of the current mode.
    pub fn reset(&mut self) {
        self.state.is_running = false;
        self.state.time_left = self.state.mode.duration_secs();
        self.emit(TimerEvent::Reset {
            mode: self.state.mode,
        });
    }

    /// Decrements the countdown by one second.
    ///
    /// Does nothing unless running with time left. When the countdown
    /// reaches zero, running is cleared and the completion step runs
    /// before this returns, so no caller ever observes a running timer at
    /// zero.
    ///
    /// Returns true if the tick completed the current mode.
    pub fn tick(&mut self) -> bool {
        if !self.state.wants_tick() {
            return false;
        }

        self.state.time_left -= 1;
        self.emit(TimerEvent::Tick {
            time_left: self.state.time_left,
        });

        if self.state.time_left > 0 {
            return false;
        }

        self.state.is_running = false;
        self.on_complete();
        true
    }

    /// Handles natural completion of the current mode.
    ///
    /// The cue for the mode that just ended is requested first; only then
    /// is the session count or the mode touched.
    fn on_complete(&mut self) {
        let finished = self.state.mode;
        self.dispatch_cue(AudioCue::for_completed(finished));

        match finished {
            Mode::Work => {
                self.state.sessions += 1;
                info!("Work session completed (total {})", self.state.sessions);
                self.emit(TimerEvent::WorkCompleted {
                    sessions: self.state.sessions,
                });
            }
            Mode::ShortBreak => {
                info!("Short break completed");
                self.emit(TimerEvent::BreakCompleted);
            }
        }

        self.switch_mode(finished.next());
    }

    fn dispatch_cue(&self, cue: AudioCue) {
        if let Err(e) = self.player.play(cue) {
            warn!("Failed to play cue {}: {}", cue.as_str(), e);
        }
        self.emit(TimerEvent::CueDispatched {
            cue,
            mode: self.state.mode,
        });
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Timer event receiver dropped");
        }
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

// ============================================================================
// Tests
// ============================================================================
