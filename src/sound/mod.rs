//! Completion cue playback for the focus timer.
//!
//! This module provides audio notification capabilities, including:
//!
//! - The two fixed completion melodies as data
//! - A pure planner from cue to playback instructions
//! - Sine synthesis with an attack/decay envelope
//! - Non-blocking playback through rodio
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │    CuePlayer     │ ← Main interface
//! └────────┬─────────┘
//!          │ AudioCue
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ AudioCue::plan   │────▶│  synth::render   │────▶│ rodio Sink       │
//! │ (instructions)   │     │  (f32 samples)   │     │ (detached)       │
//! └──────────────────┘     └──────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use focus_timer::sound::{AudioCue, RodioCuePlayer};
//!
//! // Create a player (may fail if no audio device)
//! let player = RodioCuePlayer::new().expect("audio init");
//! player.play(AudioCue::WorkComplete).expect("playback failed");
//! ```

mod cue;
mod error;
mod player;
mod synth;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use cue::{AudioCue, ToneEvent, ToneInstruction, ATTACK_SECS, DECAY_FLOOR_GAIN};
pub use error::SoundError;
pub use player::{try_create_player, RodioCuePlayer};
pub use synth::{render, SAMPLE_RATE};

/// Trait for cue playback implementations.
///
/// This trait abstracts cue playback, allowing for different
/// implementations (rodio-based, silent, mock for testing).
pub trait CuePlayer {
    /// Requests playback of a cue.
    ///
    /// This method must not block; the cue plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started.
    fn play(&self, cue: AudioCue) -> Result<(), SoundError>;
}

impl CuePlayer for RodioCuePlayer {
    fn play(&self, cue: AudioCue) -> Result<(), SoundError> {
        RodioCuePlayer::play(self, cue)
    }
}

/// Player used when cues are turned off or no audio output exists.
/// Every request is dropped.
#[derive(Debug, Default)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play(&self, cue: AudioCue) -> Result<(), SoundError> {
        tracing::debug!("No audio output, dropping cue {}", cue.as_str());
        Ok(())
    }
}

/// Mock cue player for testing.
#[derive(Debug, Default)]
pub struct MockCuePlayer {
    play_calls: Mutex<Vec<AudioCue>>,
    should_fail: AtomicBool,
}

impl MockCuePlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<AudioCue> {
        self.play_calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
    }
}

impl CuePlayer for MockCuePlayer {
    fn play(&self, cue: AudioCue) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(cue);
        Ok(())
    }
}

/// Plays a cue through a freshly opened output and blocks until it ends.
///
/// Used by the `cue` command, where the process would otherwise exit
/// before the detached sink has played anything.
///
/// # Errors
///
/// Returns an error if audio initialization or playback fails.
pub async fn play_cue_to_end(cue: AudioCue) -> Result<(), SoundError> {
    let player = RodioCuePlayer::new()?;
    player.play(cue)?;
    tokio::time::sleep(std::time::Duration::from_secs_f32(cue.total_secs())).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls() {
        let mock = MockCuePlayer::new();
        mock.play(AudioCue::WorkComplete).unwrap();
        mock.play(AudioCue::BreakComplete).unwrap();

        assert_eq!(mock.play_count(), 2);
        assert_eq!(
            mock.get_play_calls(),
            vec![AudioCue::WorkComplete, AudioCue::BreakComplete]
        );

        mock.clear_calls();
        assert_eq!(mock.play_count(), 0);
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockCuePlayer::new();
        mock.set_should_fail(true);

        let result = mock.play(AudioCue::WorkComplete);
        assert!(matches!(result, Err(SoundError::PlaybackError(_))));
        assert_eq!(mock.play_count(), 0);
    }

    #[test]
    fn test_silent_player_accepts_everything() {
        let player = SilentCuePlayer;
        assert!(player.play(AudioCue::WorkComplete).is_ok());
        assert!(player.play(AudioCue::BreakComplete).is_ok());
    }
}
