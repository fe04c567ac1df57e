//! Per-sample input and output voltages, plus the read-only status the UI polls.

use crate::dsp::FilterMode;
use crate::{NUM_CHANNELS, NUM_TAPS};

/// One frame of jack voltages. `None` means the jack is not patched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub left: f32,
    /// Normalled to `left` when unpatched.
    pub right: Option<f32>,
    /// Clock pulses. While patched and measured, the clock sets the base time.
    pub clock: Option<f32>,
    /// Scales the free-running base time by `2^(cv / 5)`.
    pub time_cv: Option<f32>,
    pub feedback_cv: Option<f32>,
    pub groove_amount_cv: Option<f32>,
    pub tone_cv: Option<f32>,
    pub mix_cv: Option<f32>,
    /// External return for the feedback loop, per channel. Replaces the
    /// internal feedback value when patched.
    pub feedback_return: [Option<f32>; NUM_CHANNELS],
}

impl InputFrame {
    pub fn mono(sample: f32) -> Self {
        Self {
            left: sample,
            ..Self::default()
        }
    }

    pub fn stereo(left: f32, right: f32) -> Self {
        Self {
            left,
            right: Some(right),
            ..Self::default()
        }
    }

    pub fn with_clock(mut self, clock: f32) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Signal on `channel` after normalling.
    #[inline]
    pub fn channel(&self, channel: usize) -> f32 {
        match channel {
            0 => self.left,
            _ => self.right.unwrap_or(self.left),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutputFrame {
    pub left: f32,
    pub right: f32,
    /// Tone-shaped, gain-scaled feedback leaving each channel.
    pub feedback_send: [f32; NUM_CHANNELS],
}

impl OutputFrame {
    #[inline]
    pub fn channel(&self, channel: usize) -> f32 {
        match channel {
            0 => self.left,
            _ => self.right,
        }
    }
}

/// Advisory display state. Nothing here feeds back into the signal path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub groove: usize,
    pub groove_name: &'static str,
    pub division_name: &'static str,
    /// Base time in seconds after clocking and time CV.
    pub base_time: f32,
    pub clocked: bool,
    /// Target delay of each tap in seconds, stacking included. A voice only
    /// glides toward a target more than 16 samples from its current depth,
    /// so the depth actually playing can sit up to 15 samples off this value.
    pub tap_delays: [f32; NUM_TAPS],
    /// Bit `i` set when tap `i` is muted.
    pub muted: u16,
    /// Bit `i` set when tap `i` is stacked.
    pub stacked: u16,
    pub filter_modes: [FilterMode; NUM_TAPS],
    pub ping_pong: bool,
}

impl Status {
    pub fn is_muted(&self, tap: usize) -> bool {
        self.muted & (1 << tap) != 0
    }

    pub fn is_stacked(&self, tap: usize) -> bool {
        self.stacked & (1 << tap) != 0
    }
}
