//! Benchmarks for crossfades and the pan law.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tapestry_dsp::dsp::mix::{self, MixLaw};
use tapestry_dsp::NUM_TAPS;

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let dry: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let wet: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();
        let mut output = vec![0.0f32; size];

        for &(label, law) in &[("linear", MixLaw::Linear), ("equal_power", MixLaw::EqualPower)] {
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| {
                    for ((out, &d), &w) in output.iter_mut().zip(&dry).zip(&wet) {
                        *out = mix::crossfade(d, w, black_box(0.3), law);
                    }
                })
            });
        }

        // Sixteen panned taps summed into a stereo pair
        let pans: Vec<f32> = (0..NUM_TAPS).map(|t| t as f32 / (NUM_TAPS - 1) as f32).collect();
        group.bench_with_input(BenchmarkId::new("pan_16_taps", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = [0.0f32; 2];
                for &x in &dry {
                    for &pan in &pans {
                        let pan = black_box(pan);
                        acc[0] += x * mix::pan_weight(pan, 0);
                        acc[1] += x * mix::pan_weight(pan, 1);
                    }
                }
                acc
            })
        });
    }

    group.finish();
}
