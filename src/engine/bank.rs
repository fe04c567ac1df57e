//! The sixteen shared tap configurations and the delay each one resolves to.

use crate::dsp::FilterMode;
use crate::engine::params::TapParams;
use crate::engine::tap::Tap;
use crate::timing::groove::GroovePattern;
use crate::NUM_TAPS;

/// Delay of every tap in seconds.
///
/// Each tap sits at `base × position / NUM_TAPS`, clamped to `[0, max_delay]`.
/// A stacked tap borrows the delay of the nearest following tap that is not
/// stacked. A stacked run with nothing free after it keeps its own delays.
pub fn resolve_delays(
    base_time: f32,
    groove: &GroovePattern,
    amount: f32,
    stacked: [bool; NUM_TAPS],
    max_delay: f32,
) -> [f32; NUM_TAPS] {
    let mut delays = [0.0; NUM_TAPS];
    let mut next_free: Option<f32> = None;

    for tap in (0..NUM_TAPS).rev() {
        let own = (base_time * groove.time_fraction(tap, amount)).clamp(0.0, max_delay);
        delays[tap] = match next_free {
            Some(borrowed) if stacked[tap] => borrowed,
            _ => own,
        };
        if !stacked[tap] {
            next_free = Some(own);
        }
    }
    delays
}

pub struct TapBank {
    taps: [Tap; NUM_TAPS],
    delays: [f32; NUM_TAPS],
}

impl TapBank {
    pub fn new() -> Self {
        Self {
            taps: std::array::from_fn(|_| Tap::new()),
            delays: [0.0; NUM_TAPS],
        }
    }

    #[inline]
    pub fn tap(&self, index: usize) -> &Tap {
        &self.taps[index]
    }

    #[inline]
    pub fn tap_mut(&mut self, index: usize) -> Option<&mut Tap> {
        self.taps.get_mut(index)
    }

    /// Resolved delay of `index` in seconds, as of the last [`TapBank::resolve`].
    #[inline]
    pub fn delay(&self, index: usize) -> f32 {
        self.delays[index]
    }

    pub fn delays(&self) -> &[f32; NUM_TAPS] {
        &self.delays
    }

    pub fn resolve(&mut self, base_time: f32, groove: &GroovePattern, amount: f32, max_delay: f32) {
        let stacked = std::array::from_fn(|i| self.taps[i].stacked);
        self.delays = resolve_delays(base_time, groove, amount, stacked, max_delay);
    }

    /// Edge-detect every tap's buttons and refresh filter coefficients.
    pub fn update(&mut self, params: &[TapParams; NUM_TAPS], sample_rate: f32) {
        for (tap, tap_params) in self.taps.iter_mut().zip(params.iter()) {
            tap.poll_buttons(tap_params);
            tap.configure_filter(tap_params, sample_rate);
        }
    }

    pub fn invalidate(&mut self) {
        for tap in self.taps.iter_mut() {
            tap.invalidate();
        }
    }

    pub fn muted_mask(&self) -> u16 {
        mask(self.taps.iter().map(|t| t.muted))
    }

    pub fn stacked_mask(&self) -> u16 {
        mask(self.taps.iter().map(|t| t.stacked))
    }

    pub fn filter_modes(&self) -> [FilterMode; NUM_TAPS] {
        std::array::from_fn(|i| self.taps[i].filter_mode)
    }
}

impl Default for TapBank {
    fn default() -> Self {
        Self::new()
    }
}

fn mask(flags: impl Iterator<Item = bool>) -> u16 {
    flags
        .enumerate()
        .fold(0, |acc, (i, set)| if set { acc | (1 << i) } else { acc })
}
