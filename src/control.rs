//! Discrete edits sent to the engine from outside the audio callback.

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::FilterMode;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    ToggleMute(usize),
    ToggleStack(usize),
    CycleFilter(usize),
    SetFilterMode { tap: usize, mode: FilterMode },
    TogglePingPong,
    ClearBuffers,
}

/// Anything the engine can drain control messages from without blocking.
pub trait ControlReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl ControlReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}
