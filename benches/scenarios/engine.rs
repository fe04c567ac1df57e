//! Benchmarks for the full multi-tap engine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapestry_dsp::dsp::FilterMode;
use tapestry_dsp::{EngineConfig, InputFrame, MultiTapDelay, Params, NUM_TAPS};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.07).sin()).collect();
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        // === PLAIN ===
        // all taps open, no filters, straight time
        let mut engine = MultiTapDelay::new(EngineConfig::default());
        let params = Params {
            time: 0.8,
            feedback: 0.4,
            ..Params::default()
        };
        group.bench_with_input(BenchmarkId::new("plain", size), &size, |b, _| {
            b.iter(|| {
                left.copy_from_slice(&input);
                right.copy_from_slice(&input);
                engine.process_block(black_box(&params), &mut left, &mut right);
            })
        });

        // === FILTERED GROOVE ===
        // every tap filtered, swung, dark feedback
        let mut engine = MultiTapDelay::new(EngineConfig::default());
        let mut params = Params {
            time: 1.2,
            groove: 1,
            groove_amount: 0.8,
            feedback: 0.6,
            feedback_tone: 0.2,
            ..Params::default()
        };
        for tap in 0..NUM_TAPS {
            engine.set_filter_mode(tap, FilterMode::ALL[1 + tap % 4]);
            params.taps[tap].cutoff = tap as f32 / NUM_TAPS as f32;
            params.taps[tap].resonance = 0.4;
            params.taps[tap].pan = (tap % 2) as f32;
        }
        group.bench_with_input(BenchmarkId::new("filtered_groove", size), &size, |b, _| {
            b.iter(|| {
                left.copy_from_slice(&input);
                right.copy_from_slice(&input);
                engine.process_block(black_box(&params), &mut left, &mut right);
            })
        });

        // === SWEPT TIME ===
        // base time changes every block, so the resamplers keep correcting
        let mut engine = MultiTapDelay::new(EngineConfig::default());
        let mut params = Params::default();
        let mut block = 0usize;
        group.bench_with_input(BenchmarkId::new("swept_time", size), &size, |b, _| {
            b.iter(|| {
                block += 1;
                params.time = 0.3 + 0.2 * ((block as f32) * 0.01).sin();
                for &x in &input {
                    black_box(engine.process(&params, &InputFrame::mono(x)));
                }
            })
        });
    }

    group.finish();
}
