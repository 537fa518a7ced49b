//! Focus Timer Library
//!
//! This library provides the core functionality for the focus timer CLI.
//! It includes:
//! - Timer engine with work/break mode transitions and session counting
//! - Tick scheduler owning the single one-second countdown callback
//! - Completion cues synthesized from fixed melodies and played with rodio
//! - The interactive session loop and CLI display utilities
//! - Type definitions for modes, state and JSON snapshots

pub mod app;
pub mod cli;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{format_time, Mode, TimerSnapshot, TimerState};

pub use timer::{TickFired, TickScheduler, TimerController, TimerEngine, TimerEvent};

pub use sound::{
    try_create_player, AudioCue, CuePlayer, MockCuePlayer, RodioCuePlayer, SilentCuePlayer,
    SoundError, ToneEvent, ToneInstruction,
};

pub use app::{App, AppConfig, UserAction};
