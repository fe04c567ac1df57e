//! Benchmarks for the history ring.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapestry_dsp::dsp::history::HistoryBuffer;
use tapestry_dsp::{HISTORY_SIZE, NUM_TAPS};

use crate::BLOCK_SIZES;

pub fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/history");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        let mut ring = HistoryBuffer::<NUM_TAPS>::new(HISTORY_SIZE);
        group.bench_with_input(BenchmarkId::new("push", size), &size, |b, _| {
            b.iter(|| {
                for &sample in &input {
                    ring.push(black_box(sample));
                }
            })
        });

        // Every tap reads a one-sample window per frame (zero-delay worst case)
        let mut ring = HistoryBuffer::<NUM_TAPS>::new(HISTORY_SIZE);
        group.bench_with_input(BenchmarkId::new("push_and_read_16", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &sample in &input {
                    ring.push(sample);
                    for reader in 0..NUM_TAPS {
                        let window = ring.start_data(reader);
                        sum += window.get(window.len().saturating_sub(1));
                        ring.start_incr(reader, window.len());
                    }
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}
