//! Benchmarks for the feedback tone control.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapestry_dsp::dsp::tone::ToneControl;

use crate::BLOCK_SIZES;

pub fn bench_tone(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/tone");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &(label, color) in &[("dark", 0.1f32), ("neutral", 0.5), ("bright", 0.9)] {
            let mut tone = ToneControl::new();
            tone.configure(color, 48_000.0);
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for &x in &input {
                        sum += tone.process(black_box(x));
                    }
                    sum
                })
            });
        }
    }

    group.finish();
}
