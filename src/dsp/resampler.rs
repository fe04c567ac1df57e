//! Rate-adapting resampler that turns a tap's history reader into a stream
//! with a continuously adjustable delay.

use crate::dsp::history::HistoryWindow;
use crate::STAGING_CAPACITY;

/*
Why Resample a Delay Tap?
=========================

A tap's delay is "how far its read cursor trails the write cursor". Jumping
the cursor when the delay time changes clicks. Instead the tap keeps reading
continuously and changes how FAST it reads:

  - depth too small (consume >= +16): read at half speed, producing two output
    samples per input sample. The writer pulls away and the depth grows.
  - depth too large (consume <= -16): read at double speed, producing one
    output per two inputs. The reader catches up and the depth shrinks.
  - otherwise: read at unity. With an integral phase this is a plain copy.

    consume = desired_depth - buffered_samples

    consume:   ... -17  -16  -15 ...  0  ... 15   16   17 ...
    ratio:         0.5  0.5  1.0 ... 1.0 ... 1.0  2.0  2.0

The ratio is only re-chosen when the tap's staging queue runs dry, so it is
constant over each small batch and the correction speed is bounded to one
octave of pitch bend.

Output samples between history positions are linearly interpolated. The
fractional read phase carries over from one batch to the next so
consecutive batches join without a seam.
*/

/// Distance (in samples) between desired and buffered depth before the
/// resampler starts correcting.
pub const RATIO_THRESHOLD: f32 = 16.0;

/// Pick the output/input rate for the next refill.
#[inline]
pub fn select_ratio(consume: f32) -> f32 {
    if consume <= -RATIO_THRESHOLD {
        0.5
    } else if consume >= RATIO_THRESHOLD {
        2.0
    } else {
        1.0
    }
}

/// Fixed-capacity FIFO of resampled samples waiting to be played.
#[derive(Debug, Clone)]
pub struct StagingQueue {
    samples: [f32; STAGING_CAPACITY],
    head: usize,
    len: usize,
}

impl StagingQueue {
    pub const CAPACITY: usize = STAGING_CAPACITY;

    pub fn new() -> Self {
        Self {
            samples: [0.0; STAGING_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == STAGING_CAPACITY
    }

    /// Returns `false` (and drops the sample) when full.
    #[inline]
    pub fn push(&mut self, sample: f32) -> bool {
        if self.is_full() {
            return false;
        }
        let slot = (self.head + self.len) % STAGING_CAPACITY;
        self.samples[slot] = sample;
        self.len += 1;
        true
    }

    /// Pop the oldest sample.
    #[inline]
    pub fn shift(&mut self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let sample = self.samples[self.head];
        self.head = (self.head + 1) % STAGING_CAPACITY;
        self.len -= 1;
        Some(sample)
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

impl Default for StagingQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of one refill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refill {
    /// History samples the reader may now release.
    pub consumed: usize,
    /// Samples appended to the staging queue.
    pub produced: usize,
}

/// Streaming linear-interpolation resampler with a persistent read phase.
#[derive(Debug, Clone, Default)]
pub struct LinearResampler {
    phase: f32,
}

impl LinearResampler {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Fractional read position left over from the previous batch.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Resample at most `STAGING_CAPACITY` history samples from `input` into
    /// `out` at `ratio` output samples per input sample, stopping when the
    /// queue is full.
    pub fn process(&mut self, input: &HistoryWindow<'_>, ratio: f32, out: &mut StagingQueue) -> Refill {
        let step = 1.0 / ratio.clamp(0.5, 2.0);
        let max_consume = input.len().min(STAGING_CAPACITY);
        // Interpolating past the last consumable sample may peek one further.
        let readable = input.len().min(STAGING_CAPACITY + 1);

        let mut position = self.phase;
        let mut produced = 0;

        while !out.is_full() {
            let index = position as usize;
            if index >= max_consume {
                break;
            }
            let frac = position - index as f32;
            let a = input.get(index);
            let sample = if frac > 0.0 {
                if index + 1 >= readable {
                    break;
                }
                a + (input.get(index + 1) - a) * frac
            } else {
                a
            };
            out.push(sample);
            produced += 1;
            position += step;
        }

        let consumed = (position as usize).min(max_consume);
        self.phase = position - consumed as f32;

        Refill { consumed, produced }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::history::HistoryBuffer;

    fn ramp_ring(len: usize) -> HistoryBuffer<1> {
        let mut ring = HistoryBuffer::<1>::new(256);
        for i in 0..len {
            ring.push(i as f32);
        }
        ring
    }

    fn drain(queue: &mut StagingQueue) -> Vec<f32> {
        let mut out = Vec::new();
        while let Some(s) = queue.shift() {
            out.push(s);
        }
        out
    }

    #[test]
    fn test_ratio_threshold_table() {
        for consume in -20..=20 {
            let expected = if consume <= -16 {
                0.5
            } else if consume >= 16 {
                2.0
            } else {
                1.0
            };
            assert_eq!(
                select_ratio(consume as f32),
                expected,
                "consume={consume} picked the wrong ratio"
            );
        }
        assert_eq!(select_ratio(-15.9), 1.0);
        assert_eq!(select_ratio(15.9), 1.0);
    }

    #[test]
    fn test_queue_is_fifo_and_bounded() {
        let mut queue = StagingQueue::new();
        for i in 0..StagingQueue::CAPACITY {
            assert!(queue.push(i as f32));
        }
        assert!(queue.is_full());
        assert!(!queue.push(99.0), "push beyond capacity must be refused");
        assert_eq!(queue.len(), StagingQueue::CAPACITY);

        assert_eq!(queue.shift(), Some(0.0));
        assert!(queue.push(16.0));
        let rest = drain(&mut queue);
        assert_eq!(rest.first(), Some(&1.0));
        assert_eq!(rest.last(), Some(&16.0));
        assert_eq!(queue.shift(), None);
    }

    #[test]
    fn test_unity_ratio_copies_input() {
        let ring = ramp_ring(40);
        let mut resampler = LinearResampler::new();
        let mut queue = StagingQueue::new();

        let refill = resampler.process(&ring.start_data(0), 1.0, &mut queue);

        assert_eq!(refill, Refill { consumed: 16, produced: 16 });
        assert_eq!(drain(&mut queue), (0..16).map(|i| i as f32).collect::<Vec<_>>());
        assert_eq!(resampler.phase(), 0.0);
    }

    #[test]
    fn test_double_ratio_interpolates_and_consumes_half() {
        let ring = ramp_ring(40);
        let mut resampler = LinearResampler::new();
        let mut queue = StagingQueue::new();

        let refill = resampler.process(&ring.start_data(0), 2.0, &mut queue);

        assert_eq!(refill.produced, 16);
        assert_eq!(refill.consumed, 8);
        let out = drain(&mut queue);
        for (i, s) in out.iter().enumerate() {
            assert!((s - i as f32 * 0.5).abs() < 1e-6, "sample {i} = {s}");
        }
    }

    #[test]
    fn test_half_ratio_skips_and_consumes_window() {
        let ring = ramp_ring(40);
        let mut resampler = LinearResampler::new();
        let mut queue = StagingQueue::new();

        let refill = resampler.process(&ring.start_data(0), 0.5, &mut queue);

        assert_eq!(refill.consumed, 16);
        assert_eq!(refill.produced, 8);
        assert_eq!(
            drain(&mut queue),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]
        );
    }

    #[test]
    fn test_short_window_produces_what_is_available() {
        let ring = ramp_ring(3);
        let mut resampler = LinearResampler::new();
        let mut queue = StagingQueue::new();

        let refill = resampler.process(&ring.start_data(0), 1.0, &mut queue);

        assert_eq!(refill, Refill { consumed: 3, produced: 3 });
    }

    #[test]
    fn test_empty_window_underruns() {
        let ring = HistoryBuffer::<1>::new(64);
        let mut resampler = LinearResampler::new();
        let mut queue = StagingQueue::new();

        let refill = resampler.process(&ring.start_data(0), 1.0, &mut queue);

        assert_eq!(refill, Refill { consumed: 0, produced: 0 });
        assert_eq!(queue.shift(), None);
    }

    #[test]
    fn test_queue_never_exceeds_capacity_under_any_ratio() {
        let mut ring = HistoryBuffer::<1>::new(1024);
        let mut resampler = LinearResampler::new();
        let mut queue = StagingQueue::new();

        for consume in -20..=20 {
            for i in 0..40 {
                ring.push((i as f32 * 0.3).sin());
            }
            let ratio = select_ratio(consume as f32);
            let refill = resampler.process(&ring.start_data(0), ratio, &mut queue);
            ring.start_incr(0, refill.consumed);
            assert!(queue.len() <= StagingQueue::CAPACITY);
            queue.clear();
        }
    }

    #[test]
    fn test_phase_carries_between_batches() {
        let mut ring = ramp_ring(64);
        let mut resampler = LinearResampler::new();
        let mut queue = StagingQueue::new();

        // Three outputs per two inputs leaves a fractional phase behind.
        let refill = resampler.process(&ring.start_data(0), 1.5, &mut queue);
        ring.start_incr(0, refill.consumed);
        let first = drain(&mut queue);
        let refill = resampler.process(&ring.start_data(0), 1.5, &mut queue);
        let second = drain(&mut queue);

        assert!(refill.produced > 0);
        let step = 1.0 / 1.5;
        let joined: Vec<f32> = first.into_iter().chain(second).collect();
        for pair in joined.windows(2) {
            assert!(
                (pair[1] - pair[0] - step).abs() < 1e-3,
                "seam between batches: {:?}",
                pair
            );
        }
    }
}
