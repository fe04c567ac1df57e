//! Persisted toggles.
//!
//! Only the discrete state a user builds up by pressing buttons is saved:
//! mute, stack and filter mode per tap, plus ping-pong. Everything else is a
//! pure function of the knobs and gets recomputed after loading.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::FilterMode;
use crate::NUM_TAPS;

/// Format version written by [`ToggleState::to_json`].
pub const STATE_VERSION: u32 = 1;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleState {
    pub version: u32,
    pub muted: [bool; NUM_TAPS],
    pub stacked: [bool; NUM_TAPS],
    pub filter_modes: [FilterMode; NUM_TAPS],
    pub ping_pong: bool,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            muted: [false; NUM_TAPS],
            stacked: [false; NUM_TAPS],
            filter_modes: [FilterMode::Off; NUM_TAPS],
            ping_pong: false,
        }
    }
}

impl ToggleState {
    pub fn muted_mask(&self) -> u16 {
        to_mask(&self.muted)
    }

    pub fn stacked_mask(&self) -> u16 {
        to_mask(&self.stacked)
    }
}

fn to_mask(flags: &[bool; NUM_TAPS]) -> u16 {
    flags
        .iter()
        .enumerate()
        .fold(0, |acc, (i, &set)| if set { acc | (1 << i) } else { acc })
}

#[cfg(feature = "serde")]
#[derive(Debug)]
pub enum StateError {
    /// The document is not valid toggle-state JSON.
    Json(serde_json::Error),
    /// Written by a newer (or unknown) format.
    UnsupportedVersion { found: u32, expected: u32 },
}

#[cfg(feature = "serde")]
impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::Json(err) => write!(f, "Malformed toggle state: {}", err),
            StateError::UnsupportedVersion { found, expected } => write!(
                f,
                "Unsupported toggle state version {} (this build reads version {})",
                found, expected
            ),
        }
    }
}

#[cfg(feature = "serde")]
impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StateError::Json(err) => Some(err),
            StateError::UnsupportedVersion { .. } => None,
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for StateError {
    fn from(err: serde_json::Error) -> Self {
        StateError::Json(err)
    }
}

#[cfg(feature = "serde")]
impl ToggleState {
    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a saved state. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let state: ToggleState = serde_json::from_str(json).map_err(|err| {
            log::warn!("discarding toggle state: {}", err);
            StateError::Json(err)
        })?;
        if state.version != STATE_VERSION {
            log::warn!(
                "discarding toggle state: version {} (expected {})",
                state.version,
                STATE_VERSION
            );
            return Err(StateError::UnsupportedVersion {
                found: state.version,
                expected: STATE_VERSION,
            });
        }
        Ok(state)
    }
}
