//! Core data types for the focus timer.
//!
//! This module defines the data structures used for:
//! - The two timer modes and their fixed durations
//! - Timer state with its invariants
//! - Presentation helpers (`MM:SS` formatting, progress, labels)
//! - Serializable snapshots for the JSON output mode

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Mode
// ============================================================================

/// Work duration in seconds (25 minutes).
pub const WORK_SECS: u32 = 25 * 60;

/// Short break duration in seconds (5 minutes).
pub const SHORT_BREAK_SECS: u32 = 5 * 60;

/// The active phase of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Focused work interval
    #[default]
    Work,
    /// Short break between work intervals
    ShortBreak,
}

impl Mode {
    /// Returns the fixed duration of this mode in seconds.
    #[must_use]
    pub const fn duration_secs(self) -> u32 {
        match self {
            Mode::Work => WORK_SECS,
            Mode::ShortBreak => SHORT_BREAK_SECS,
        }
    }

    /// Returns the mode that follows this one on natural completion.
    #[must_use]
    pub const fn next(self) -> Mode {
        match self {
            Mode::Work => Mode::ShortBreak,
            Mode::ShortBreak => Mode::Work,
        }
    }

    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short_break",
        }
    }

    /// Heading shown above the countdown.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "作業時間",
            Mode::ShortBreak => "休憩",
        }
    }

    /// Short label used on the mode selector badges.
    pub fn badge_label(&self) -> &'static str {
        match self {
            Mode::Work => "作業",
            Mode::ShortBreak => "休憩",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
///
/// Fields are read-only outside this crate; all mutation goes through
/// [`crate::timer::TimerEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub(crate) mode: Mode,
    pub(crate) time_left: u32,
    pub(crate) is_running: bool,
    pub(crate) sessions: u32,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    /// Creates the initial state: paused at the start of a work interval.
    pub fn new() -> Self {
        Self {
            mode: Mode::Work,
            time_left: Mode::Work.duration_secs(),
            is_running: false,
            sessions: 0,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Remaining seconds in the current mode.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Returns true if the countdown is running.
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Number of completed work intervals.
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Returns true when the tick scheduler should hold a live callback.
    pub fn wants_tick(&self) -> bool {
        self.is_running && self.time_left > 0
    }

    /// Elapsed share of the current mode, in percent (0.0 to 100.0).
    pub fn progress(&self) -> f64 {
        let total = f64::from(self.mode.duration_secs());
        (total - f64::from(self.time_left)) / total * 100.0
    }

    /// Remaining time formatted as `MM:SS`.
    pub fn formatted_time(&self) -> String {
        format_time(self.time_left)
    }

    pub(crate) fn switch_to(&mut self, mode: Mode) {
        self.mode = mode;
        self.time_left = mode.duration_secs();
        self.is_running = false;
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Serializable view of the timer for the JSON output mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    #[serde(rename = "timeLeft")]
    pub time_left: u32,
    #[serde(rename = "isRunning")]
    pub is_running: bool,
    pub sessions: u32,
    pub formatted: String,
    pub progress: f64,
}

impl TimerSnapshot {
    /// Creates a snapshot from timer state.
    pub fn from_timer_state(state: &TimerState) -> Self {
        Self {
            mode: state.mode,
            time_left: state.time_left,
            is_running: state.is_running,
            sessions: state.sessions,
            formatted: state.formatted_time(),
            progress: state.progress(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
