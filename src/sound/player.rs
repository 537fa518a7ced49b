//! Cue player implementation using rodio.
//!
//! This module provides the `RodioCuePlayer` which renders a cue with
//! [`super::synth::render`] and hands the samples to a detached rodio sink.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::cue::AudioCue;
use super::error::SoundError;
use super::synth::{render, SAMPLE_RATE};

/// A cue player that uses rodio for audio playback.
///
/// The output stream is opened once and kept for the lifetime of the player.
/// Every cue gets its own sink, so cues requested back to back mix instead
/// of sharing a playback cursor.
pub struct RodioCuePlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioCuePlayer {
    /// Creates a new cue player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a cue.
    ///
    /// This method is non-blocking; the cue plays in the background on
    /// rodio's output thread and cannot be cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if a sink cannot be created on the output stream.
    pub fn play(&self, cue: AudioCue) -> Result<(), SoundError> {
        let samples = render(&cue.plan(0.0), SAMPLE_RATE);
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        sink.detach(); // Non-blocking: the cue continues after this returns

        debug!("Cue {} started (detached)", cue.as_str());
        Ok(())
    }
}

impl std::fmt::Debug for RodioCuePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioCuePlayer").finish_non_exhaustive()
    }
}

/// Creates a cue player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<RodioCuePlayer> {
    match RodioCuePlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, cues disabled: {}", e);
            None
        }
    }
}
