//! Knob and switch positions handed to the engine every frame.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::timing::division::{DIVISIONS, UNITY_DIVISION};
use crate::timing::groove::GROOVES;
use crate::{MIN_TIME, NUM_TAPS};

/// Longest free-running base time, in seconds.
pub const MAX_TIME: f32 = 10.0;
/// Feedback gain ceiling. Unity would recirculate forever.
pub const MAX_FEEDBACK: f32 = 0.99;
/// Pitch-shift range in semitones.
pub const PITCH_SHIFT_RANGE: f32 = 24.0;
/// Detune range in cents.
pub const DETUNE_RANGE: f32 = 100.0;
/// Momentary buttons are plain voltages; anything above this is treated as 10 V.
const BUTTON_MAX: f32 = 10.0;

#[inline]
fn clamp_or(value: f32, min: f32, max: f32, default: f32) -> f32 {
    if value.is_nan() {
        default
    } else {
        value.clamp(min, max)
    }
}

/// Per-tap controls.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapParams {
    /// Mix weight, 0..1.
    pub level: f32,
    /// 0 hard left, 0.5 centre, 1 hard right.
    pub pan: f32,
    /// Normalized filter cutoff, 0..1 (15 Hz .. 8.4 kHz).
    pub cutoff: f32,
    /// 0..1.
    pub resonance: f32,
    pub mute_button: f32,
    pub stack_button: f32,
    pub filter_button: f32,
    /// Semitones, -24..24. Carried and clamped only; the signal path ignores it.
    pub pitch_shift: f32,
    /// Cents, -100..100. Carried and clamped only; the signal path ignores it.
    pub detune: f32,
}

impl Default for TapParams {
    fn default() -> Self {
        Self {
            level: 0.5,
            pan: 0.5,
            cutoff: 0.5,
            resonance: 0.0,
            mute_button: 0.0,
            stack_button: 0.0,
            filter_button: 0.0,
            pitch_shift: 0.0,
            detune: 0.0,
        }
    }
}

impl TapParams {
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            level: clamp_or(self.level, 0.0, 1.0, d.level),
            pan: clamp_or(self.pan, 0.0, 1.0, d.pan),
            cutoff: clamp_or(self.cutoff, 0.0, 1.0, d.cutoff),
            resonance: clamp_or(self.resonance, 0.0, 1.0, d.resonance),
            mute_button: clamp_or(self.mute_button, 0.0, BUTTON_MAX, 0.0),
            stack_button: clamp_or(self.stack_button, 0.0, BUTTON_MAX, 0.0),
            filter_button: clamp_or(self.filter_button, 0.0, BUTTON_MAX, 0.0),
            pitch_shift: clamp_or(
                self.pitch_shift,
                -PITCH_SHIFT_RANGE,
                PITCH_SHIFT_RANGE,
                d.pitch_shift,
            ),
            detune: clamp_or(self.detune, -DETUNE_RANGE, DETUNE_RANGE, d.detune),
        }
    }
}

/// Snapshot of every control the engine reads.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Free-running base time in seconds (0.001..10). Ignored while clocked.
    pub time: f32,
    /// Index into the clock division table.
    pub clock_division: usize,
    /// Index into the groove table.
    pub groove: usize,
    /// 0 = straight, 1 = groove as written.
    pub groove_amount: f32,
    /// 0..0.99.
    pub feedback: f32,
    /// Tap whose output is recirculated.
    pub feedback_tap: usize,
    /// Feedback color, 0..1. 0.5 leaves the loop untouched.
    pub feedback_tone: f32,
    /// 0 dry, 1 wet.
    pub mix: f32,
    /// Crossfade with constant power instead of linearly.
    pub equal_power_mix: bool,
    pub ping_pong_button: f32,
    pub clear_button: f32,
    pub taps: [TapParams; NUM_TAPS],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            time: 0.5,
            clock_division: UNITY_DIVISION,
            groove: 0,
            groove_amount: 0.0,
            feedback: 0.0,
            feedback_tap: NUM_TAPS - 1,
            feedback_tone: 0.5,
            mix: 0.5,
            equal_power_mix: false,
            ping_pong_button: 0.0,
            clear_button: 0.0,
            taps: [TapParams::default(); NUM_TAPS],
        }
    }
}

impl Params {
    /// Copy with every value forced into its declared range. NaN falls back
    /// to the default.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        let mut taps = self.taps;
        for tap in taps.iter_mut() {
            *tap = tap.clamped();
        }
        Self {
            time: clamp_or(self.time, MIN_TIME, MAX_TIME, d.time),
            clock_division: self.clock_division.min(DIVISIONS.len() - 1),
            groove: self.groove.min(GROOVES.len() - 1),
            groove_amount: clamp_or(self.groove_amount, 0.0, 1.0, d.groove_amount),
            feedback: clamp_or(self.feedback, 0.0, MAX_FEEDBACK, d.feedback),
            feedback_tap: self.feedback_tap.min(NUM_TAPS - 1),
            feedback_tone: clamp_or(self.feedback_tone, 0.0, 1.0, d.feedback_tone),
            mix: clamp_or(self.mix, 0.0, 1.0, d.mix),
            equal_power_mix: self.equal_power_mix,
            ping_pong_button: clamp_or(self.ping_pong_button, 0.0, BUTTON_MAX, 0.0),
            clear_button: clamp_or(self.clear_button, 0.0, BUTTON_MAX, 0.0),
            taps,
        }
    }

    /// Every tap muted by level except `tap`, which plays at unity.
    pub fn solo(tap: usize) -> Self {
        let mut params = Self::default();
        for (index, tap_params) in params.taps.iter_mut().enumerate() {
            tap_params.level = if index == tap { 1.0 } else { 0.0 };
        }
        params
    }
}

/// Add a 0..10 V control voltage as `cv / 10` of `range` and clamp.
#[inline]
pub(crate) fn with_cv(value: f32, cv: Option<f32>, min: f32, max: f32) -> f32 {
    match cv {
        Some(cv) if cv.is_finite() => (value + cv / 10.0 * (max - min)).clamp(min, max),
        _ => value,
    }
}
