//! Sample rendering for tone instructions.

use std::f32::consts::TAU;

use super::cue::ToneInstruction;

/// Output sample rate for rendered cues.
pub const SAMPLE_RATE: u32 = 44_100;

/// Renders mono `f32` samples for the given instructions.
///
/// The buffer starts at time zero and ends at the latest stop time.
/// Overlapping tones are summed.
#[must_use]
pub fn render(instructions: &[ToneInstruction], sample_rate: u32) -> Vec<f32> {
    let end = instructions
        .iter()
        .map(|i| i.stop_secs)
        .fold(0.0_f32, f32::max);
    let rate = sample_rate as f32;
    let mut samples = vec![0.0_f32; (end * rate).ceil() as usize];

    for instruction in instructions {
        let first = (instruction.start_secs * rate).floor().max(0.0) as usize;
        let last = ((instruction.stop_secs * rate).ceil() as usize).min(samples.len());

        for (n, sample) in samples.iter_mut().enumerate().take(last).skip(first) {
            let t = n as f32 / rate;
            let gain = instruction.gain_at(t);
            if gain > 0.0 {
                let phase = TAU * instruction.frequency_hz * (t - instruction.start_secs);
                *sample += gain * phase.sin();
            }
        }
    }

    samples
}
