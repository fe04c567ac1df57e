//! Benchmarks for the delay primitives and the full engine.
//!
//! Run with: cargo bench
//!
//! Every frame runs 16 taps on 2 channels, so the per-tap cost is what
//! decides whether the engine fits its deadline.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (history ring, resampler, filter, tone, mix)
//!   - scenarios/*  The whole multi-tap engine under typical settings

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_history,
    dsp::bench_resampler,
    dsp::bench_filter,
    dsp::bench_tone,
    dsp::bench_mix,
    // Whole engine
    scenarios::bench_engine,
);
criterion_main!(benches);
