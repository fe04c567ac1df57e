//! Clock divisions.
//!
//! When a clock is patched in, the measured inter-pulse interval is scaled by
//! one of these fractions to give the base delay time. `1/4` of a bar-length
//! clock gives quarter-note echoes, `3/16` a dotted eighth, and so on.

/// A named fraction of the measured clock interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockDivision {
    pub name: &'static str,
    pub numerator: u16,
    pub denominator: u16,
}

impl ClockDivision {
    const fn new(name: &'static str, numerator: u16, denominator: u16) -> Self {
        Self {
            name,
            numerator,
            denominator,
        }
    }

    #[inline]
    pub fn ratio(&self) -> f32 {
        self.numerator as f32 / self.denominator as f32
    }

    /// Base time for a measured clock interval.
    #[inline]
    pub fn apply(&self, interval_seconds: f32) -> f32 {
        interval_seconds * self.ratio()
    }
}

/// Index of `1/1` in [`DIVISIONS`].
pub const UNITY_DIVISION: usize = DIVISIONS.len() - 1;

pub const DIVISIONS: [ClockDivision; 21] = [
    ClockDivision::new("1/256", 1, 256),
    ClockDivision::new("1/192", 1, 192),
    ClockDivision::new("1/128", 1, 128),
    ClockDivision::new("1/96", 1, 96),
    ClockDivision::new("1/64", 1, 64),
    ClockDivision::new("1/48", 1, 48),
    ClockDivision::new("1/32", 1, 32),
    ClockDivision::new("1/24", 1, 24),
    ClockDivision::new("1/16", 1, 16),
    ClockDivision::new("1/12", 1, 12),
    ClockDivision::new("3/32", 3, 32),
    ClockDivision::new("1/8", 1, 8),
    ClockDivision::new("1/6", 1, 6),
    ClockDivision::new("3/16", 3, 16),
    ClockDivision::new("1/4", 1, 4),
    ClockDivision::new("1/3", 1, 3),
    ClockDivision::new("3/8", 3, 8),
    ClockDivision::new("1/2", 1, 2),
    ClockDivision::new("2/3", 2, 3),
    ClockDivision::new("3/4", 3, 4),
    ClockDivision::new("1/1", 1, 1),
];

/// Division by index, saturating at `1/1`.
pub fn division(index: usize) -> &'static ClockDivision {
    &DIVISIONS[index.min(UNITY_DIVISION)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divisions_ascend() {
        for pair in DIVISIONS.windows(2) {
            assert!(
                pair[0].ratio() < pair[1].ratio(),
                "{} should be shorter than {}",
                pair[0].name,
                pair[1].name
            );
        }
    }

    #[test]
    fn test_range_endpoints() {
        assert_eq!(DIVISIONS[0].ratio(), 1.0 / 256.0);
        assert_eq!(division(UNITY_DIVISION).ratio(), 1.0);
        assert_eq!(division(500).name, "1/1");
    }

    #[test]
    fn test_apply_scales_interval() {
        let quarter = DIVISIONS.iter().find(|d| d.name == "1/4").unwrap();
        assert!((quarter.apply(2.0) - 0.5).abs() < 1e-6);
        let dotted_eighth = DIVISIONS.iter().find(|d| d.name == "3/16").unwrap();
        assert!((dotted_eighth.apply(1.0) - 0.1875).abs() < 1e-6);
    }
}
