//! The multi-tap delay engine.
//!
//! [`MultiTapDelay`] owns every buffer it will ever touch; after `new` the
//! per-frame path neither allocates nor blocks. One call to
//! [`MultiTapDelay::process`] runs a full frame:
//!
//! 1. edge-detect buttons, measure the clock, resolve each tap's delay
//! 2. per channel: push `input + pending feedback` into the history ring
//! 3. per tap: resample from its cursor, filter, weight and pan into the wet sum
//! 4. tone-shape the feedback tap and queue it for the next frame
//! 5. crossfade dry and wet

/// Delay resolution and the shared per-tap configuration.
pub mod bank;
/// Tone-shaped, optionally ping-ponged recirculation.
pub mod feedback;
/// Input, output and status frames.
pub mod frame;
/// Parameter snapshot and ranges.
pub mod params;
/// Shared tap configuration and per-channel tap voices.
pub mod tap;

use crate::control::{ControlMessage, ControlReceiver};
use crate::dsp::history::HistoryBuffer;
use crate::dsp::mix::{crossfade, pan_weight, MixLaw};
use crate::dsp::trigger::{ClockTimer, SchmittTrigger};
use crate::dsp::FilterMode;
use crate::state::ToggleState;
use crate::timing::division::division;
use crate::timing::groove::groove;
use crate::{HISTORY_SIZE, MIN_TIME, NUM_CHANNELS, NUM_TAPS, STAGING_CAPACITY};

use self::bank::TapBank;
use self::feedback::FeedbackPath;
use self::frame::{InputFrame, OutputFrame, Status};
use self::params::{with_cv, Params, MAX_FEEDBACK, MAX_TIME};
use self::tap::TapVoice;

/// Construction-time settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// History length per channel in samples, rounded up to a power of two.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            history_capacity: HISTORY_SIZE,
        }
    }
}

pub struct MultiTapDelay {
    sample_rate: f32,
    history: [HistoryBuffer<NUM_TAPS>; NUM_CHANNELS],
    voices: [[TapVoice; NUM_TAPS]; NUM_CHANNELS],
    bank: TapBank,
    feedback: FeedbackPath,
    clock: ClockTimer,
    clear_trigger: SchmittTrigger,
    max_delay: f32,
    // Last resolved values, kept for `status`.
    base_time: f32,
    clocked: bool,
    groove: usize,
    division: usize,
}

impl MultiTapDelay {
    pub fn new(config: EngineConfig) -> Self {
        let sample_rate = sanitize_rate(config.sample_rate);
        let history: [HistoryBuffer<NUM_TAPS>; NUM_CHANNELS] =
            std::array::from_fn(|_| HistoryBuffer::new(config.history_capacity));
        let capacity = history[0].capacity();
        log::debug!(
            "multi-tap delay: {} taps x {} channels, history {} samples, {} Hz",
            NUM_TAPS,
            NUM_CHANNELS,
            capacity,
            sample_rate
        );

        let defaults = Params::default();
        Self {
            sample_rate,
            history,
            voices: std::array::from_fn(|_| std::array::from_fn(|_| TapVoice::new())),
            bank: TapBank::new(),
            feedback: FeedbackPath::new(),
            clock: ClockTimer::new(),
            clear_trigger: SchmittTrigger::new(),
            max_delay: max_delay_seconds(capacity, sample_rate),
            base_time: defaults.time,
            clocked: false,
            groove: defaults.groove,
            division: defaults.clock_division,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Longest delay any tap can reach at the current sample rate, in seconds.
    pub fn max_delay(&self) -> f32 {
        self.max_delay
    }

    /// Sample-rate change hook. Filter and tone caches are invalidated and
    /// the clock has to be measured again.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let sample_rate = sanitize_rate(sample_rate);
        if sample_rate == self.sample_rate {
            return;
        }
        log::info!("sample rate {} -> {} Hz", self.sample_rate, sample_rate);
        self.sample_rate = sample_rate;
        self.max_delay = max_delay_seconds(self.history[0].capacity(), sample_rate);
        self.bank.invalidate();
        self.feedback.invalidate();
        self.clock.reset();
    }

    /// Silence everything: history, staging queues, filter memories and the
    /// feedback loop. Toggles are kept.
    pub fn reset(&mut self) {
        for history in self.history.iter_mut() {
            history.clear();
        }
        for voice in self.voices.iter_mut().flatten() {
            voice.reset();
        }
        self.feedback.reset();
        self.clock.reset();
    }

    /// The panel's clear button.
    pub fn clear_buffers(&mut self) {
        self.reset();
    }

    /// Run one frame.
    pub fn process(&mut self, params: &Params, input: &InputFrame) -> OutputFrame {
        let params = params.clamped();
        let sample_rate = self.sample_rate;

        if self.clear_trigger.process(params.clear_button) {
            self.clear_buffers();
        }
        self.feedback.poll_button(params.ping_pong_button);
        self.bank.update(&params.taps, sample_rate);

        self.base_time = self.resolve_base_time(&params, input);
        self.groove = params.groove;
        self.division = params.clock_division;

        let amount = with_cv(params.groove_amount, input.groove_amount_cv, 0.0, 1.0);
        self.bank
            .resolve(self.base_time, groove(params.groove), amount, self.max_delay);

        let feedback_amount = with_cv(params.feedback, input.feedback_cv, 0.0, MAX_FEEDBACK);
        let tone = with_cv(params.feedback_tone, input.tone_cv, 0.0, 1.0);
        let mix = with_cv(params.mix, input.mix_cv, 0.0, 1.0);

        // A non-finite input sample is recorded as silence.
        let dry = [finite_or_silence(input.channel(0)), finite_or_silence(input.channel(1))];
        let mut wet = [0.0; NUM_CHANNELS];
        let mut captured = [0.0; NUM_CHANNELS];

        for ch in 0..NUM_CHANNELS {
            let history = &mut self.history[ch];
            history.push(dry[ch] + self.feedback.injection(ch));

            for (index, voice) in self.voices[ch].iter_mut().enumerate() {
                let tap = self.bank.tap(index);
                let delay_samples = self.bank.delay(index) * sample_rate;
                let raw = voice.next_sample(history, index, delay_samples);
                let filtered = voice.filter(raw, tap.filter_mode, tap.coefficients());

                // Feedback listens before the mute.
                if index == params.feedback_tap {
                    captured[ch] = filtered;
                }
                if !tap.muted {
                    let tap_params = &params.taps[index];
                    wet[ch] += filtered * tap_params.level * pan_weight(tap_params.pan, ch);
                }
            }
        }

        let feedback_send = self.feedback.capture(
            captured,
            feedback_amount,
            tone,
            sample_rate,
            input.feedback_return,
        );

        let law = if params.equal_power_mix {
            MixLaw::EqualPower
        } else {
            MixLaw::Linear
        };
        OutputFrame {
            left: crossfade(dry[0], wet[0], mix, law),
            right: crossfade(dry[1], wet[1], mix, law),
            feedback_send,
        }
    }

    /// Process a stereo block in place. Only the common length of the two
    /// slices is touched.
    pub fn process_block(&mut self, params: &Params, left: &mut [f32], right: &mut [f32]) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let out = self.process(params, &InputFrame::stereo(*l, *r));
            *l = out.left;
            *r = out.right;
        }
    }

    fn resolve_base_time(&mut self, params: &Params, input: &InputFrame) -> f32 {
        match input.clock {
            Some(level) => {
                self.clock.tick(level);
            }
            None => self.clock.reset(),
        }

        match self.clock.period_seconds(self.sample_rate) {
            Some(interval) => {
                self.clocked = true;
                division(params.clock_division)
                    .apply(interval)
                    .clamp(0.0, self.max_delay)
            }
            None => {
                self.clocked = false;
                let scale = match input.time_cv {
                    Some(cv) if cv.is_finite() => (cv / 5.0).exp2(),
                    _ => 1.0,
                };
                (params.time * scale).clamp(MIN_TIME, MAX_TIME)
            }
        }
    }

    pub fn status(&self) -> Status {
        let pattern = groove(self.groove);
        Status {
            groove: self.groove,
            groove_name: pattern.name,
            division_name: division(self.division).name,
            base_time: self.base_time,
            clocked: self.clocked,
            tap_delays: *self.bank.delays(),
            muted: self.bank.muted_mask(),
            stacked: self.bank.stacked_mask(),
            filter_modes: self.bank.filter_modes(),
            ping_pong: self.feedback.ping_pong(),
        }
    }

    /* Discrete edits -------------------------------------------------- */

    pub fn toggle_mute(&mut self, tap: usize) {
        if let Some(tap) = self.bank.tap_mut(tap) {
            tap.toggle_mute();
        }
    }

    pub fn toggle_stack(&mut self, tap: usize) {
        if let Some(tap) = self.bank.tap_mut(tap) {
            tap.toggle_stack();
        }
    }

    pub fn cycle_filter(&mut self, tap: usize) {
        if let Some(tap) = self.bank.tap_mut(tap) {
            tap.cycle_filter();
        }
    }

    pub fn set_filter_mode(&mut self, tap: usize, mode: FilterMode) {
        if let Some(tap) = self.bank.tap_mut(tap) {
            tap.filter_mode = mode;
        }
    }

    pub fn toggle_ping_pong(&mut self) {
        self.feedback.toggle_ping_pong();
    }

    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::ToggleMute(tap) => self.toggle_mute(tap),
            ControlMessage::ToggleStack(tap) => self.toggle_stack(tap),
            ControlMessage::CycleFilter(tap) => self.cycle_filter(tap),
            ControlMessage::SetFilterMode { tap, mode } => self.set_filter_mode(tap, mode),
            ControlMessage::TogglePingPong => self.toggle_ping_pong(),
            ControlMessage::ClearBuffers => self.clear_buffers(),
        }
    }

    /// Apply every queued control message.
    pub fn drain_controls<R: ControlReceiver + ?Sized>(&mut self, receiver: &mut R) {
        while let Some(message) = receiver.pop() {
            self.apply(message);
        }
    }

    /// Snapshot of the persistable toggles.
    pub fn toggles(&self) -> ToggleState {
        ToggleState {
            muted: std::array::from_fn(|i| self.bank.tap(i).muted),
            stacked: std::array::from_fn(|i| self.bank.tap(i).stacked),
            filter_modes: self.bank.filter_modes(),
            ping_pong: self.feedback.ping_pong(),
            ..ToggleState::default()
        }
    }

    pub fn restore_toggles(&mut self, state: &ToggleState) {
        log::debug!(
            "restoring toggles: muted {:#06x}, stacked {:#06x}, ping-pong {}",
            state.muted_mask(),
            state.stacked_mask(),
            state.ping_pong
        );
        for index in 0..NUM_TAPS {
            if let Some(tap) = self.bank.tap_mut(index) {
                tap.muted = state.muted[index];
                tap.stacked = state.stacked[index];
                tap.filter_mode = state.filter_modes[index];
            }
        }
        self.feedback.set_ping_pong(state.ping_pong);
    }
}

impl Default for MultiTapDelay {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn sanitize_rate(sample_rate: f32) -> f32 {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate
    } else {
        log::warn!("ignoring invalid sample rate {}, using 48 kHz", sample_rate);
        EngineConfig::default().sample_rate
    }
}

#[inline]
fn finite_or_silence(sample: f32) -> f32 {
    if sample.is_finite() {
        sample
    } else {
        0.0
    }
}

/// Deepest delay that still leaves a staging window plus the interpolation
/// neighbour inside the ring.
fn max_delay_seconds(capacity: usize, sample_rate: f32) -> f32 {
    capacity.saturating_sub(STAGING_CAPACITY + 2) as f32 / sample_rate
}
