//! Real-world scenario benchmarks.
//!
//! These run the complete engine the way a host would: one block at a
//! time with a fixed parameter snapshot.

mod engine;

pub use engine::bench_engine;
