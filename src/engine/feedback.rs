//! The recirculation loop: one tap's output, colored and scaled, summed into
//! the next frame's input.

use crate::dsp::tone::ToneControl;
use crate::dsp::trigger::SchmittTrigger;
use crate::NUM_CHANNELS;

/*
    tap out ─► tone ─► × amount ─┬─► feedback_send
                                 │
            feedback_return? ────┤ (replaces the internal value when patched)
                                 ▼
                         ping-pong swap?
                                 │
                                 ▼
                     pending[ch] ─► added to next frame's input

There is no limiter. With amount < 1 and the tone filters being passive the
loop gain stays below unity; only a non-finite value is caught, and it clears
the loop rather than propagating.
*/

pub struct FeedbackPath {
    tone: [ToneControl; NUM_CHANNELS],
    pending: [f32; NUM_CHANNELS],
    ping_pong: bool,
    ping_pong_trigger: SchmittTrigger,
}

impl FeedbackPath {
    pub fn new() -> Self {
        Self {
            tone: [ToneControl::new(); NUM_CHANNELS],
            pending: [0.0; NUM_CHANNELS],
            ping_pong: false,
            ping_pong_trigger: SchmittTrigger::new(),
        }
    }

    /// Value to add to `channel`'s input this frame.
    #[inline]
    pub fn injection(&self, channel: usize) -> f32 {
        self.pending[channel]
    }

    pub fn ping_pong(&self) -> bool {
        self.ping_pong
    }

    pub fn set_ping_pong(&mut self, enabled: bool) {
        self.ping_pong = enabled;
    }

    pub fn toggle_ping_pong(&mut self) {
        self.ping_pong = !self.ping_pong;
    }

    /// Toggle ping-pong on a rising edge of the momentary button.
    #[inline]
    pub fn poll_button(&mut self, level: f32) {
        if self.ping_pong_trigger.process(level) {
            self.toggle_ping_pong();
        }
    }

    /// Shape this frame's captured tap values and queue them for the next
    /// frame. Returns the per-channel send.
    #[inline]
    pub fn capture(
        &mut self,
        captured: [f32; NUM_CHANNELS],
        amount: f32,
        color: f32,
        sample_rate: f32,
        returns: [Option<f32>; NUM_CHANNELS],
    ) -> [f32; NUM_CHANNELS] {
        let mut send = [0.0; NUM_CHANNELS];
        let mut routed = [0.0; NUM_CHANNELS];

        for ch in 0..NUM_CHANNELS {
            let tone = &mut self.tone[ch];
            tone.configure(color, sample_rate);
            let shaped = tone.process(captured[ch]) * amount;
            send[ch] = if shaped.is_finite() {
                shaped
            } else {
                tone.reset();
                0.0
            };
            routed[ch] = match returns[ch] {
                Some(value) if value.is_finite() => value,
                Some(_) => 0.0,
                None => send[ch],
            };
        }

        self.pending = if self.ping_pong {
            [routed[1], routed[0]]
        } else {
            routed
        };
        send
    }

    /// Force tone coefficients to be recomputed, e.g. after a sample-rate change.
    pub fn invalidate(&mut self) {
        for tone in self.tone.iter_mut() {
            tone.invalidate();
        }
    }

    /// Drop the pending loop value and tone filter memory. Ping-pong survives.
    pub fn reset(&mut self) {
        self.pending = [0.0; NUM_CHANNELS];
        for tone in self.tone.iter_mut() {
            tone.reset();
        }
    }
}

impl Default for FeedbackPath {
    fn default() -> Self {
        Self::new()
    }
}
