//! Shared state types for UI communication
//!
//! Everything that crosses into the audio thread is `Copy` so it can travel
//! through an `rtrb` ring without allocating.

use std::path::PathBuf;

use tapestry_dsp::{Params, Status, ToggleState, NUM_TAPS};

/// What the UI sends to the audio thread whenever a knob moves.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot {
    pub params: Params,
    /// Whether the source's clock output is patched into the delay.
    pub clock_patched: bool,
}

/// Static information gathered before the UI starts (can allocate)
#[derive(Clone, Debug)]
pub struct UiInit {
    pub device_name: String,
    pub sample_rate: f32,
    pub channels: usize,
    /// Actual spacing of source blips after rounding to whole samples.
    pub pulse_interval: f32,
    pub toggle_file: Option<PathBuf>,
}

/// Persistable toggles as last reported by the audio thread.
pub fn toggles_from_status(status: &Status) -> ToggleState {
    ToggleState {
        muted: std::array::from_fn(|tap| status.is_muted(tap)),
        stacked: std::array::from_fn(|tap| status.is_stacked(tap)),
        filter_modes: status.filter_modes,
        ping_pong: status.ping_pong,
        ..ToggleState::default()
    }
}

/// Nudge a value by `delta` and keep it inside `[min, max]`.
pub fn nudge(value: &mut f32, delta: f32, min: f32, max: f32) {
    *value = (*value + delta).clamp(min, max);
}

/// Step an index by `delta` within `0..len`, wrapping.
pub fn step_index(index: &mut usize, delta: isize, len: usize) {
    let len = len as isize;
    *index = ((*index as isize + delta).rem_euclid(len)) as usize;
}

/// Tap index moved left or right across the grid.
pub fn step_tap(tap: &mut usize, delta: isize) {
    step_index(tap, delta, NUM_TAPS);
}
