//! Benchmarks for the tap state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapestry_dsp::dsp::filter::{FilterMode, SvfCoefficients, SvfState};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for mode in [
            FilterMode::LowPass,
            FilterMode::HighPass,
            FilterMode::BandPass,
            FilterMode::Notch,
        ] {
            let mut coeffs = SvfCoefficients::new();
            let mut state = SvfState::new();
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(mode.name(), size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    coeffs.update(1000.0, 0.5, black_box(SAMPLE_RATE));
                    for sample in buffer.iter_mut() {
                        *sample = state.next_sample(*sample, &coeffs).select(mode, *sample);
                    }
                    black_box(&buffer);
                })
            });
        }

        // Cutoff moving every sample: the cache misses on every update
        let mut coeffs = SvfCoefficients::new();
        let mut state = SvfState::new();
        group.bench_with_input(BenchmarkId::new("swept_cutoff", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for (i, &x) in input.iter().enumerate() {
                    coeffs.update(200.0 + i as f32, 0.3, SAMPLE_RATE);
                    sum += state.next_sample(x, &coeffs).lowpass;
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}
