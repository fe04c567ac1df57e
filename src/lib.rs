//! Realtime-safe multi-tap groove delay.
//!
//! Sixteen taps per channel read from a shared history ring at their own,
//! continuously varying depth. Each tap resamples its reader on the fly so
//! delay-time changes glide instead of clicking, then runs through its own
//! state-variable filter before being panned into the wet mix. One tap is
//! tone-shaped and fed back into the history, optionally ping-ponged across
//! the stereo pair.
//!
//! ```text
//!  in ──(+)──► [history] ──► tap 0..15: resample ─► SVF ─► level/pan ──► Σ wet ─► crossfade ─► out
//!        ▲                                  │
//!        └──── ping-pong? ◄── gain ◄── tone ◄── feedback tap
//! ```

pub mod control;
pub mod dsp;
pub mod engine;
pub mod state;
pub mod timing;

pub use control::{ControlMessage, ControlReceiver};
pub use engine::{
    frame::{InputFrame, OutputFrame, Status},
    params::{Params, TapParams},
    EngineConfig, MultiTapDelay,
};
pub use state::ToggleState;
#[cfg(feature = "serde")]
pub use state::StateError;

/// Number of delay taps per channel.
pub const NUM_TAPS: usize = 16;
/// Left and right.
pub const NUM_CHANNELS: usize = 2;
/// Default history capacity per channel, in samples. Must stay a power of two.
pub const HISTORY_SIZE: usize = 1 << 21;
/// Capacity of each tap's resampled output queue.
pub const STAGING_CAPACITY: usize = 16;
/// Largest block `process_block` callers are expected to hand over at once.
pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 1000.0;
