//! Benchmarks for the tap resampler at each correction ratio.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapestry_dsp::dsp::history::HistoryBuffer;
use tapestry_dsp::dsp::resampler::{LinearResampler, StagingQueue};

use crate::BLOCK_SIZES;

pub fn bench_resampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/resampler");

    let mut ring = HistoryBuffer::<1>::new(1 << 12);
    for i in 0..4096 {
        ring.push((i as f32 * 0.05).sin());
    }

    for &size in BLOCK_SIZES {
        for &(label, ratio) in &[("half", 0.5f32), ("unity", 1.0), ("double", 2.0)] {
            let mut resampler = LinearResampler::new();
            let mut queue = StagingQueue::new();
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| {
                    // One refill per drained queue, as a tap does
                    let mut sum = 0.0f32;
                    for _ in 0..size {
                        if queue.is_empty() {
                            ring.seek(0, 1024);
                            let window = ring.start_data(0);
                            resampler.process(&window, black_box(ratio), &mut queue);
                        }
                        sum += queue.shift().unwrap_or(0.0);
                    }
                    sum
                })
            });
        }
    }

    group.finish();
}
