//! Feedback tone shaping: one lowpass and one highpass one-pole in series,
//! both steered by a single "color" control.

use std::f32::consts::PI;

/// Lowpass cutoff when fully open.
pub const TONE_LOWPASS_OPEN_HZ: f32 = 20_000.0;
/// Highpass cutoff when fully open.
pub const TONE_HIGHPASS_OPEN_HZ: f32 = 20.0;
/// Each half of the color knob sweeps its filter by this factor (two decades).
pub const TONE_SWEEP: f32 = 100.0;
/// Half-width of the neutral zone around color = 0.5 where both filters are bypassed.
pub const TONE_NEUTRAL_BAND: f32 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnePoleKind {
    LowPass,
    HighPass,
}

/// Single-pole filter (6 dB/octave).
#[derive(Debug, Clone, Copy)]
pub struct OnePole {
    kind: OnePoleKind,
    coefficient: f32,
    prev_output: f32,
    prev_input: f32,
}

impl OnePole {
    pub fn lowpass() -> Self {
        Self {
            kind: OnePoleKind::LowPass,
            coefficient: 0.0,
            prev_output: 0.0,
            prev_input: 0.0,
        }
    }

    pub fn highpass() -> Self {
        Self {
            kind: OnePoleKind::HighPass,
            ..Self::lowpass()
        }
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32, sample_rate: f32) {
        let safe_cutoff = cutoff_hz.clamp(1.0, sample_rate * 0.49);
        self.coefficient = (-2.0 * PI * safe_cutoff / sample_rate).exp();
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = match self.kind {
            OnePoleKind::LowPass => {
                (1.0 - self.coefficient) * input + self.coefficient * self.prev_output
            }
            // Leaky differentiator: y[n] = a * (y[n-1] + x[n] - x[n-1])
            OnePoleKind::HighPass => {
                self.coefficient * (self.prev_output + input - self.prev_input)
            }
        };
        self.prev_input = input;
        self.prev_output = output;
        output
    }

    pub fn reset(&mut self) {
        self.prev_output = 0.0;
        self.prev_input = 0.0;
    }
}

/// Cutoffs for a color value: `(lowpass, highpass)`, `None` when bypassed.
pub fn tone_cutoffs(color: f32) -> (Option<f32>, Option<f32>) {
    let color = color.clamp(0.0, 1.0);
    let offset = color - 0.5;
    if offset < -TONE_NEUTRAL_BAND {
        let depth = -offset * 2.0;
        (Some(TONE_LOWPASS_OPEN_HZ / TONE_SWEEP.powf(depth)), None)
    } else if offset > TONE_NEUTRAL_BAND {
        let depth = offset * 2.0;
        (None, Some(TONE_HIGHPASS_OPEN_HZ * TONE_SWEEP.powf(depth)))
    } else {
        (None, None)
    }
}

/// Lowpass → highpass cascade driven by one color value in 0..1.
///
/// Below 0.5 the lowpass closes from 20 kHz down to 200 Hz, above 0.5 the
/// highpass opens from 20 Hz up to 2 kHz. Right at the centre both are out
/// of circuit and the signal passes untouched.
#[derive(Debug, Clone, Copy)]
pub struct ToneControl {
    lowpass: OnePole,
    highpass: OnePole,
    lowpass_active: bool,
    highpass_active: bool,
    color: f32,
    sample_rate: f32,
}

impl ToneControl {
    pub fn new() -> Self {
        Self {
            lowpass: OnePole::lowpass(),
            highpass: OnePole::highpass(),
            lowpass_active: false,
            highpass_active: false,
            color: f32::NAN,
            sample_rate: f32::NAN,
        }
    }

    /// Recalculates cutoffs only when color or sample rate changed.
    pub fn configure(&mut self, color: f32, sample_rate: f32) {
        if color == self.color && sample_rate == self.sample_rate {
            return;
        }
        self.color = color;
        self.sample_rate = sample_rate;

        let (lowpass, highpass) = tone_cutoffs(color);
        self.lowpass_active = lowpass.is_some();
        self.highpass_active = highpass.is_some();
        if let Some(cutoff) = lowpass {
            self.lowpass.set_cutoff(cutoff, sample_rate);
        }
        if let Some(cutoff) = highpass {
            self.highpass.set_cutoff(cutoff, sample_rate);
        }
    }

    pub fn invalidate(&mut self) {
        self.sample_rate = f32::NAN;
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut signal = input;
        if self.lowpass_active {
            signal = self.lowpass.process(signal);
        }
        if self.highpass_active {
            signal = self.highpass.process(signal);
        }
        signal
    }

    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.highpass.reset();
    }
}

impl Default for ToneControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine_peak(tone: &mut ToneControl, freq: f32) -> f32 {
        tone.reset();
        (0..4800)
            .map(|i| tone.process((TAU * freq * i as f32 / SAMPLE_RATE).sin()))
            .skip(2400)
            .fold(0.0f32, |acc, x| acc.max(x.abs()))
    }

    #[test]
    fn test_neutral_color_is_transparent() {
        let mut tone = ToneControl::new();
        tone.configure(0.5, SAMPLE_RATE);
        for x in [1.0, -0.5, 0.25, 0.0, 3.0] {
            assert_eq!(tone.process(x), x);
        }
    }

    #[test]
    fn test_cutoffs_span_two_decades() {
        let (lp, hp) = tone_cutoffs(0.0);
        assert!((lp.unwrap() - 200.0).abs() < 0.01);
        assert!(hp.is_none());

        let (lp, hp) = tone_cutoffs(1.0);
        assert!(lp.is_none());
        assert!((hp.unwrap() - 2_000.0).abs() < 0.1);

        assert_eq!(tone_cutoffs(0.5), (None, None));
    }

    #[test]
    fn test_dark_color_removes_highs() {
        let mut tone = ToneControl::new();
        tone.configure(0.0, SAMPLE_RATE);
        let low = sine_peak(&mut tone, 50.0);
        let high = sine_peak(&mut tone, 8_000.0);
        assert!(low > 0.8, "lows should survive, got {low}");
        assert!(high < 0.1, "highs should be cut, got {high}");
    }

    #[test]
    fn test_bright_color_removes_lows() {
        let mut tone = ToneControl::new();
        tone.configure(1.0, SAMPLE_RATE);
        let low = sine_peak(&mut tone, 50.0);
        let high = sine_peak(&mut tone, 10_000.0);
        assert!(low < 0.1, "lows should be cut, got {low}");
        assert!(high > 0.8, "highs should survive, got {high}");
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut hp = OnePole::highpass();
        hp.set_cutoff(100.0, SAMPLE_RATE);
        let mut last = 1.0;
        for _ in 0..48_000 {
            last = hp.process(1.0);
        }
        assert!(last.abs() < 1e-3);
    }
}
