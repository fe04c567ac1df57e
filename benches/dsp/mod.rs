//! Benchmarks for low-level DSP primitives.

mod filter;
mod history;
mod mix;
mod resampler;
mod tone;

pub use filter::bench_filter;
pub use history::bench_history;
pub use mix::bench_mix;
pub use resampler::bench_resampler;
pub use tone::bench_tone;
