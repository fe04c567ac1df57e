//! A delay tap, split in two halves.
//!
//! [`Tap`] is what both channels share: toggles, filter mode and the cached
//! filter coefficients. [`TapVoice`] is the per-channel half: the resampler,
//! its staging queue and the filter integrators.

use crate::dsp::filter::{cutoff_from_normalized, FilterMode, SvfCoefficients, SvfState};
use crate::dsp::history::HistoryBuffer;
use crate::dsp::resampler::{select_ratio, LinearResampler, StagingQueue};
use crate::dsp::trigger::SchmittTrigger;
use crate::engine::params::TapParams;
use crate::NUM_TAPS;

#[derive(Debug, Clone)]
pub struct Tap {
    pub muted: bool,
    pub stacked: bool,
    pub filter_mode: FilterMode,
    coeffs: SvfCoefficients,
    // Normalized cutoff last mapped to Hz, and the result.
    cutoff_control: f32,
    cutoff_hz: f32,
    mute_trigger: SchmittTrigger,
    stack_trigger: SchmittTrigger,
    filter_trigger: SchmittTrigger,
}

impl Tap {
    pub fn new() -> Self {
        Self {
            muted: false,
            stacked: false,
            filter_mode: FilterMode::Off,
            coeffs: SvfCoefficients::new(),
            cutoff_control: f32::NAN,
            cutoff_hz: 0.0,
            mute_trigger: SchmittTrigger::new(),
            stack_trigger: SchmittTrigger::new(),
            filter_trigger: SchmittTrigger::new(),
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn toggle_stack(&mut self) {
        self.stacked = !self.stacked;
    }

    pub fn cycle_filter(&mut self) {
        self.filter_mode = self.filter_mode.next();
    }

    /// Apply rising edges of the momentary buttons.
    pub fn poll_buttons(&mut self, params: &TapParams) {
        if self.mute_trigger.process(params.mute_button) {
            self.toggle_mute();
        }
        if self.stack_trigger.process(params.stack_button) {
            self.toggle_stack();
        }
        if self.filter_trigger.process(params.filter_button) {
            self.cycle_filter();
        }
    }

    /// Refresh filter coefficients if cutoff, resonance or sample rate moved.
    /// Bypassed taps skip the check entirely. Returns `true` when the
    /// coefficients were recomputed.
    #[inline]
    pub fn configure_filter(&mut self, params: &TapParams, sample_rate: f32) -> bool {
        if self.filter_mode == FilterMode::Off {
            return false;
        }
        if params.cutoff != self.cutoff_control {
            self.cutoff_control = params.cutoff;
            self.cutoff_hz = cutoff_from_normalized(params.cutoff);
        }
        self.coeffs.update(self.cutoff_hz, params.resonance, sample_rate)
    }

    #[inline]
    pub fn coefficients(&self) -> &SvfCoefficients {
        &self.coeffs
    }

    pub fn invalidate(&mut self) {
        self.coeffs.invalidate();
    }
}

impl Default for Tap {
    fn default() -> Self {
        Self::new()
    }
}

/// One tap's playback state on one channel.
#[derive(Debug, Clone, Default)]
pub struct TapVoice {
    resampler: LinearResampler,
    queue: StagingQueue,
    filter: SvfState,
    primed: bool,
}

impl TapVoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next resampled sample for a tap `delay_samples` behind the newest
    /// history sample. `reader` is the tap's cursor in `history`.
    ///
    /// An empty queue is refilled first; if the refill produced nothing the
    /// tap plays silence for this frame.
    #[inline]
    pub fn next_sample(
        &mut self,
        history: &mut HistoryBuffer<NUM_TAPS>,
        reader: usize,
        delay_samples: f32,
    ) -> f32 {
        if self.queue.is_empty() {
            self.refill(history, reader, delay_samples);
        }
        self.queue.shift().unwrap_or(0.0)
    }

    fn refill(&mut self, history: &mut HistoryBuffer<NUM_TAPS>, reader: usize, delay_samples: f32) {
        if !self.primed {
            // Fresh voice: jump straight to the target depth. History behind
            // the cursor is silence at this point, so the jump is inaudible.
            history.seek(reader, delay_samples.round().max(0.0) as usize);
            self.resampler.reset();
            self.primed = true;
        }

        let consume = delay_samples - history.size(reader) as f32;
        let ratio = select_ratio(consume);
        let refill = {
            let window = history.start_data(reader);
            self.resampler.process(&window, ratio, &mut self.queue)
        };
        history.start_incr(reader, refill.consumed);
    }

    /// Run `sample` through this voice's filter in `mode`. A filter that has
    /// gone non-finite is reset and goes quiet for the sample.
    #[inline]
    pub fn filter(&mut self, sample: f32, mode: FilterMode, coeffs: &SvfCoefficients) -> f32 {
        if mode == FilterMode::Off {
            return sample;
        }
        let out = self.filter.next_sample(sample, coeffs).select(mode, sample);
        if !out.is_finite() || !self.filter.is_finite() {
            self.filter.reset();
            return 0.0;
        }
        out
    }

    /// Samples resampled but not yet played.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn reset(&mut self) {
        self.resampler.reset();
        self.queue.clear();
        self.filter.reset();
        self.primed = false;
    }
}
