//! Low-level DSP primitives used by the delay engine.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! making them safe to embed directly inside per-tap state. They stay focused
//! on the signal-processing math so the engine can layer orchestration on top.

/// Power-of-two history ring with independent reader cursors.
pub mod history;
/// Crossfades and the tap pan law.
pub mod mix;
/// Rate-adapting linear resampler feeding each tap's staging queue.
pub mod resampler;
/// State-variable filter with change-gated coefficients.
pub mod filter;
/// One-pole tone shaping for the feedback path.
pub mod tone;
/// Schmitt triggers and clock interval measurement.
pub mod trigger;

pub use filter::FilterMode;
