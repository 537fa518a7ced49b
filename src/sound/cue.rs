//! Completion cue definitions.
//!
//! The two melodies are fixed data. [`AudioCue::plan`] turns a cue into a
//! backend-independent list of [`ToneInstruction`]s; the synthesizer and
//! the player only ever consume that list.


use crate::types::Mode;

/// Linear attack length shared by both cues, in seconds.
pub const ATTACK_SECS: f32 = 0.05;

/// Gain the exponential decay heads towards at the end of each tone.
pub const DECAY_FLOOR_GAIN: f32 = 0.01;

/// One note of a melody.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEvent {
    pub frequency_hz: f32,
    pub duration_secs: f32,
}

const fn tone(frequency_hz: f32, duration_secs: f32) -> ToneEvent {
    ToneEvent {
        frequency_hz,
        duration_secs,
    }
}

/// A5 G5 E5 C5: a calm descent into the break.
const WORK_COMPLETE_MELODY: [ToneEvent; 4] = [
    tone(880.00, 0.4),
    tone(783.99, 0.4),
    tone(659.25, 0.4),
    tone(523.25, 0.6),
];

/// C5 D5 E5 F5 G5 G5 A5 G5 E5 C5: a bright phrase calling back to work.
const BREAK_COMPLETE_MELODY: [ToneEvent; 10] = [
    tone(523.25, 0.3),
    tone(587.33, 0.3),
    tone(659.25, 0.3),
    tone(698.46, 0.2),
    tone(783.99, 0.4),
    tone(783.99, 0.3),
    tone(880.00, 0.5),
    tone(783.99, 0.3),
    tone(659.25, 0.3),
    tone(523.25, 0.6),
];

/// The cues played when a mode completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Played when a work interval ends
    WorkComplete,
    /// Played when a short break ends
    BreakComplete,
}

impl AudioCue {
    /// Returns the cue announcing the end of `mode`.
    #[must_use]
    pub const fn for_completed(mode: Mode) -> Self {
        match mode {
            Mode::Work => AudioCue::WorkComplete,
            Mode::ShortBreak => AudioCue::BreakComplete,
        }
    }

    /// Returns the string representation of the cue.
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::WorkComplete => "work_complete",
            AudioCue::BreakComplete => "break_complete",
        }
    }

    /// The notes of one melody repeat.
    #[must_use]
    pub fn melody(&self) -> &'static [ToneEvent] {
        match self {
            AudioCue::WorkComplete => &WORK_COMPLETE_MELODY,
            AudioCue::BreakComplete => &BREAK_COMPLETE_MELODY,
        }
    }

    /// How many times the melody is played.
    #[must_use]
    pub const fn repeats(&self) -> usize {
        match self {
            AudioCue::WorkComplete => 2,
            AudioCue::BreakComplete => 3,
        }
    }

    /// Silence inserted after each repeat, in seconds.
    #[must_use]
    pub const fn repeat_gap_secs(&self) -> f32 {
        match self {
            AudioCue::WorkComplete => 0.15,
            AudioCue::BreakComplete => 0.2,
        }
    }

    /// Peak gain reached at the end of each attack.
    #[must_use]
    pub const fn peak_gain(&self) -> f32 {
        match self {
            AudioCue::WorkComplete => 0.25,
            AudioCue::BreakComplete => 0.30,
        }
    }

    /// Builds the playback instructions for this cue, starting at `cursor`
    /// seconds.
    ///
    /// Each call works on its own cursor, so plans for overlapping cues
    /// never affect each other.
    #[must_use]
    pub fn plan(&self, cursor: f32) -> Vec<ToneInstruction> {
        let melody = self.melody();
        let mut instructions = Vec::with_capacity(melody.len() * self.repeats());
        let mut at = cursor;

        for _ in 0..self.repeats() {
            for tone in melody {
                instructions.push(ToneInstruction {
                    start_secs: at,
                    stop_secs: at + tone.duration_secs,
                    frequency_hz: tone.frequency_hz,
                    peak_gain: self.peak_gain(),
                    attack_secs: ATTACK_SECS,
                    floor_gain: DECAY_FLOOR_GAIN,
                });
                at += tone.duration_secs;
            }
            at += self.repeat_gap_secs();
        }

        instructions
    }

    /// Total length of the cue including the trailing gap, in seconds.
    #[must_use]
    pub fn total_secs(&self) -> f32 {
        let melody: f32 = self.melody().iter().map(|t| t.duration_secs).sum();
        (melody + self.repeat_gap_secs()) * self.repeats() as f32
    }
}

/// A single scheduled sine tone with its attack/decay envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneInstruction {
    pub start_secs: f32,
    pub stop_secs: f32,
    pub frequency_hz: f32,
    pub peak_gain: f32,
    pub attack_secs: f32,
    pub floor_gain: f32,
}

impl ToneInstruction {
    /// Envelope gain at absolute time `t` seconds; zero outside the tone.
    #[must_use]
    pub fn gain_at(&self, t: f32) -> f32 {
        if t < self.start_secs || t >= self.stop_secs {
            return 0.0;
        }

        let attack_end = self.start_secs + self.attack_secs;
        if t < attack_end {
            return self.peak_gain * (t - self.start_secs) / self.attack_secs;
        }

        let decay_len = self.stop_secs - attack_end;
        if decay_len <= 0.0 {
            return self.peak_gain;
        }
        let ratio = self.floor_gain / self.peak_gain;
        self.peak_gain * ratio.powf((t - attack_end) / decay_len)
    }
}
