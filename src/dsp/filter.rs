use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | passes          | rejects      |
| ----------------- | --------------- | ------------ |
| low-pass          | below cutoff    | above cutoff |
| high-pass         | above cutoff    | below cutoff |
| band-pass         | around cutoff   | outside      |
| notch / band-stop | outside         | around       |

The topology-preserving (TPT) state-variable filter yields all four responses
from the same two integrators, so switching a tap's mode never touches its
state. Each tap pays for one `tan()` whenever its cutoff, resonance or the
sample rate moves; on every other sample the cached coefficients are reused.
*/

/// Lowest tap filter cutoff, at normalized position 0.
pub const MIN_CUTOFF_HZ: f32 = 15.0;
/// Highest tap filter cutoff, at normalized position 1.
pub const MAX_CUTOFF_HZ: f32 = 8400.0;
/// Floor on the damping term. Below this the filter rings practically forever.
pub const MIN_DAMPING: f32 = 0.05;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Off,
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

impl FilterMode {
    pub const ALL: [FilterMode; 5] = [
        FilterMode::Off,
        FilterMode::LowPass,
        FilterMode::HighPass,
        FilterMode::BandPass,
        FilterMode::Notch,
    ];

    /// Mode selected by the next press of a tap's filter button.
    pub fn next(self) -> Self {
        match self {
            FilterMode::Off => FilterMode::LowPass,
            FilterMode::LowPass => FilterMode::HighPass,
            FilterMode::HighPass => FilterMode::BandPass,
            FilterMode::BandPass => FilterMode::Notch,
            FilterMode::Notch => FilterMode::Off,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterMode::Off => "Off",
            FilterMode::LowPass => "LP",
            FilterMode::HighPass => "HP",
            FilterMode::BandPass => "BP",
            FilterMode::Notch => "Notch",
        }
    }
}

/// Exponential map of a normalized 0..1 control onto the tap cutoff range.
#[inline]
pub fn cutoff_from_normalized(position: f32) -> f32 {
    let position = position.clamp(0.0, 1.0);
    MIN_CUTOFF_HZ * (MAX_CUTOFF_HZ / MIN_CUTOFF_HZ).powf(position)
}

/// Linear map of a normalized 0..1 resonance onto SVF damping.
#[inline]
pub fn damping_from_resonance(resonance: f32) -> f32 {
    (2.0 - 2.0 * resonance.clamp(0.0, 1.0)).max(MIN_DAMPING)
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

impl FilterOutputs {
    #[inline]
    pub fn select(&self, mode: FilterMode, dry: f32) -> f32 {
        match mode {
            FilterMode::Off => dry,
            FilterMode::LowPass => self.lowpass,
            FilterMode::HighPass => self.highpass,
            FilterMode::BandPass => self.bandpass,
            FilterMode::Notch => self.notch,
        }
    }
}

/// Cached `g`/`k` pair, recomputed only when one of its inputs changes.
#[derive(Debug, Clone, Copy)]
pub struct SvfCoefficients {
    pub g: f32,
    pub k: f32,
    cutoff_hz: f32,
    resonance: f32,
    sample_rate: f32,
}

impl SvfCoefficients {
    pub fn new() -> Self {
        Self {
            g: 0.0,
            k: 2.0,
            cutoff_hz: f32::NAN,
            resonance: f32::NAN,
            sample_rate: f32::NAN,
        }
    }

    /// Returns `true` when the coefficients were actually recomputed.
    pub fn update(&mut self, cutoff_hz: f32, resonance: f32, sample_rate: f32) -> bool {
        if cutoff_hz == self.cutoff_hz
            && resonance == self.resonance
            && sample_rate == self.sample_rate
        {
            return false;
        }
        self.cutoff_hz = cutoff_hz;
        self.resonance = resonance;
        self.sample_rate = sample_rate;

        let nyquist_safe = 0.49 * sample_rate;
        let cutoff = cutoff_hz.clamp(1.0, nyquist_safe);
        // Prewarped integrator gain: tan(pi * fc / fs).
        self.g = (PI * cutoff / sample_rate).tan();
        self.k = damping_from_resonance(resonance);
        true
    }

    /// Force the next `update` to recompute.
    pub fn invalidate(&mut self) {
        self.sample_rate = f32::NAN;
    }
}

impl Default for SvfCoefficients {
    fn default() -> Self {
        Self::new()
    }
}

/// The two integrator memories of one SVF stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvfState {
    ic1eq: f32,
    ic2eq: f32,
}

impl SvfState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, coeffs: &SvfCoefficients) -> FilterOutputs {
        let SvfCoefficients { g, k, .. } = *coeffs;
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.ic1eq.is_finite() && self.ic2eq.is_finite()
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
