//! Built-in test signal: short decaying sine blips on a fixed grid, with a
//! matching clock pulse so the delay can lock to it.

use std::f32::consts::TAU;

/// Blip pitches, cycled one per pulse.
const NOTES_HZ: [f32; 4] = [880.0, 660.0, 550.0, 440.0];
/// Length of the clock gate at the start of every pulse.
const GATE_SECONDS: f32 = 0.01;
/// Blip amplitude decay time constant.
const DECAY_SECONDS: f32 = 0.03;
const CLOCK_HIGH: f32 = 10.0;

pub struct PulseSource {
    sample_rate: f32,
    interval: u64,
    position: u64,
    note: usize,
    phase: f32,
    envelope: f32,
    decay: f32,
}

/// One frame of the source: audio plus clock voltage.
#[derive(Clone, Copy, Debug)]
pub struct SourceFrame {
    pub audio: f32,
    pub clock: f32,
}

impl PulseSource {
    pub fn new(sample_rate: f32, interval_seconds: f32) -> Self {
        Self {
            sample_rate,
            interval: ((interval_seconds * sample_rate) as u64).max(1),
            position: 0,
            note: 0,
            phase: 0.0,
            envelope: 0.0,
            decay: (-1.0 / (DECAY_SECONDS * sample_rate)).exp(),
        }
    }

    pub fn interval_seconds(&self) -> f32 {
        self.interval as f32 / self.sample_rate
    }

    pub fn next_frame(&mut self) -> SourceFrame {
        if self.position == 0 {
            self.envelope = 1.0;
            self.phase = 0.0;
            self.note = (self.note + 1) % NOTES_HZ.len();
        }

        let gate = (GATE_SECONDS * self.sample_rate) as u64;
        let clock = if self.position < gate { CLOCK_HIGH } else { 0.0 };

        let audio = (self.phase * TAU).sin() * self.envelope * 0.5;
        self.phase = (self.phase + NOTES_HZ[self.note] / self.sample_rate).fract();
        self.envelope *= self.decay;

        self.position += 1;
        if self.position >= self.interval {
            self.position = 0;
        }

        SourceFrame { audio, clock }
    }
}
