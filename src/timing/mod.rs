//! Where the taps land in time: groove tables and clock divisions.

/// Clock divisions that scale a measured clock period into the base time.
pub mod division;
/// Named groove tables and the straight-time blend.
pub mod groove;

pub use division::ClockDivision;
pub use groove::{GroovePattern, GROOVES};
