//! Edge detection for momentary buttons and clock pulses.

/// Voltage at or above which a low trigger goes high.
pub const TRIGGER_HIGH: f32 = 1.0;
/// Voltage at or below which a high trigger falls low again.
pub const TRIGGER_LOW: f32 = 0.1;

/// Rising-edge detector with hysteresis.
///
/// Chatter between the two thresholds never produces a second edge, which is
/// what turns a bouncing momentary button into exactly one toggle.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchmittTrigger {
    high: bool,
}

impl SchmittTrigger {
    pub fn new() -> Self {
        Self { high: false }
    }

    /// Returns `true` on the sample where `value` crosses upward.
    #[inline]
    pub fn process(&mut self, value: f32) -> bool {
        if self.high {
            if value <= TRIGGER_LOW {
                self.high = false;
            }
            false
        } else if value >= TRIGGER_HIGH {
            self.high = true;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.high = false;
    }
}

/// Measures the distance between consecutive clock pulses, in samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockTimer {
    trigger: SchmittTrigger,
    elapsed: u64,
    seen_edge: bool,
    period: Option<u64>,
}

impl ClockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one sample. Returns `true` on a clock edge.
    #[inline]
    pub fn tick(&mut self, value: f32) -> bool {
        self.elapsed = self.elapsed.saturating_add(1);
        if !self.trigger.process(value) {
            return false;
        }
        if self.seen_edge {
            self.period = Some(self.elapsed);
        }
        self.seen_edge = true;
        self.elapsed = 0;
        true
    }

    /// Last complete inter-pulse interval, if two edges have been seen.
    pub fn period_samples(&self) -> Option<u64> {
        self.period
    }

    pub fn period_seconds(&self, sample_rate: f32) -> Option<f32> {
        self.period.map(|samples| samples as f32 / sample_rate)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
