/*
Groove Patterns
===============

A groove is a table of sixteen "effective positions", one per tap, on a
0..16 scale. Straight time places tap i at position i + 1, so the taps are
evenly spaced and the last one lands exactly on the base time:

    straight   |  1   2   3   4   5   6   7   8   9  10  11  12  13  14  15  16
    swing      |  1   2.25 3  4.25 ...                                 (every other tap late)

A tap's delay is

    delay(i) = base_time × position(i) / NUM_TAPS

The groove amount blends the selected table against straight time, so at
amount 0 every pattern collapses to straight and at amount 1 the table is
used as written:

    position(i) = lerp(straight[i], table[i], amount)
*/

use crate::NUM_TAPS;

/// An immutable named timing table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroovePattern {
    pub name: &'static str,
    pub positions: [f32; NUM_TAPS],
}

/// The straight-time table used as the blend origin.
pub const STRAIGHT: [f32; NUM_TAPS] = GROOVES[0].positions;

pub const GROOVES: [GroovePattern; 16] = [
    GroovePattern {
        name: "Straight",
        positions: [
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0,
            9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        ],
    },
    GroovePattern {
        name: "Swing",
        positions: [
            1.0, 2.25, 3.0, 4.25, 5.0, 6.25, 7.0, 8.25,
            9.0, 10.25, 11.0, 12.25, 13.0, 14.25, 15.0, 16.0,
        ],
    },
    GroovePattern {
        name: "Hard Swing",
        positions: [
            1.0, 2.5, 3.0, 4.5, 5.0, 6.5, 7.0, 8.5,
            9.0, 10.5, 11.0, 12.5, 13.0, 14.5, 15.0, 16.0,
        ],
    },
    GroovePattern {
        name: "Reverse Swing",
        positions: [
            1.0, 1.75, 3.0, 3.75, 5.0, 5.75, 7.0, 7.75,
            9.0, 9.75, 11.0, 11.75, 13.0, 13.75, 15.0, 15.75,
        ],
    },
    GroovePattern {
        name: "Alternate Swing",
        positions: [
            1.0, 2.25, 3.0, 3.75, 5.0, 6.25, 7.0, 7.75,
            9.0, 10.25, 11.0, 11.75, 13.0, 14.25, 15.0, 15.75,
        ],
    },
    GroovePattern {
        name: "Accelerando",
        positions: [
            4.0, 5.657, 6.928, 8.0, 8.944, 9.798, 10.583, 11.314,
            12.0, 12.649, 13.266, 13.856, 14.422, 14.967, 15.492, 16.0,
        ],
    },
    GroovePattern {
        name: "Ritardando",
        positions: [
            0.062, 0.25, 0.562, 1.0, 1.562, 2.25, 3.062, 4.0,
            5.062, 6.25, 7.562, 9.0, 10.562, 12.25, 14.062, 16.0,
        ],
    },
    GroovePattern {
        name: "Waltz Time",
        positions: [
            0.865, 1.73, 2.595, 3.892, 4.757, 5.622, 6.919, 7.784,
            8.649, 9.946, 10.811, 11.676, 12.973, 13.838, 14.703, 16.0,
        ],
    },
    GroovePattern {
        name: "Half Swing",
        positions: [
            1.0, 2.0, 3.0, 4.25, 5.0, 6.0, 7.0, 8.25,
            9.0, 10.0, 11.0, 12.25, 13.0, 14.0, 15.0, 16.0,
        ],
    },
    GroovePattern {
        name: "Roller Coaster",
        positions: [
            1.424, 2.6, 3.424, 4.0, 4.576, 5.4, 6.576, 8.0,
            9.424, 10.6, 11.424, 12.0, 12.576, 13.4, 14.576, 16.0,
        ],
    },
    GroovePattern {
        name: "Quintuple",
        positions: [
            1.0, 2.15, 3.3, 4.45, 5.6, 6.0, 7.15, 8.3,
            9.45, 10.6, 11.0, 12.15, 13.3, 14.45, 15.6, 16.0,
        ],
    },
    GroovePattern {
        name: "Random 1",
        positions: [
            0.841, 1.686, 3.136, 3.615, 5.032, 5.879, 6.602, 8.007,
            8.584, 9.94, 10.613, 11.632, 12.932, 14.294, 14.661, 15.751,
        ],
    },
    GroovePattern {
        name: "Random 2",
        positions: [
            1.115, 2.403, 3.069, 3.907, 5.429, 5.592, 7.323, 7.811,
            8.68, 9.656, 10.828, 12.285, 12.713, 14.073, 15.125, 15.885,
        ],
    },
    GroovePattern {
        name: "Random 3",
        positions: [
            1.043, 1.607, 2.604, 3.735, 5.162, 5.935, 6.833, 8.077,
            8.958, 9.82, 11.265, 12.179, 12.77, 14.067, 15.023, 16.0,
        ],
    },
    GroovePattern {
        name: "Early Reflection",
        positions: [
            0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0,
            5.5, 7.0, 8.5, 10.0, 11.5, 13.0, 14.5, 16.0,
        ],
    },
    GroovePattern {
        name: "Late Reflection",
        positions: [
            1.5, 3.0, 4.5, 6.0, 7.5, 9.0, 10.5, 12.0,
            12.5, 13.0, 13.5, 14.0, 14.5, 15.0, 15.5, 16.0,
        ],
    },
];

/// Exact at both ends: `t = 0` gives `a`, `t = 1` gives `b`.
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Number of built-in grooves.
pub const fn groove_count() -> usize {
    GROOVES.len()
}

/// Groove by index, saturating at the last table.
pub fn groove(index: usize) -> &'static GroovePattern {
    &GROOVES[index.min(GROOVES.len() - 1)]
}

impl GroovePattern {
    /// Effective position of `tap` with this groove blended in by `amount`.
    #[inline]
    pub fn position(&self, tap: usize, amount: f32) -> f32 {
        lerp(STRAIGHT[tap], self.positions[tap], amount.clamp(0.0, 1.0))
    }

    /// Fraction of the base time at which `tap` sounds.
    #[inline]
    pub fn time_fraction(&self, tap: usize, amount: f32) -> f32 {
        self.position(tap, amount) / NUM_TAPS as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_is_identity_spacing() {
        for (tap, &position) in STRAIGHT.iter().enumerate() {
            assert_eq!(position, (tap + 1) as f32);
        }
        assert_eq!(GROOVES[0].name, "Straight");
    }

    #[test]
    fn test_zero_amount_is_straight_for_every_groove() {
        for pattern in GROOVES.iter() {
            for tap in 0..NUM_TAPS {
                assert_eq!(
                    pattern.position(tap, 0.0),
                    STRAIGHT[tap],
                    "{} tap {} drifted at amount 0",
                    pattern.name,
                    tap
                );
            }
        }
    }

    #[test]
    fn test_full_amount_is_table() {
        for pattern in GROOVES.iter() {
            for tap in 0..NUM_TAPS {
                assert_eq!(
                    pattern.position(tap, 1.0),
                    pattern.positions[tap],
                    "{} tap {} missed its table value at amount 1",
                    pattern.name,
                    tap
                );
            }
        }
    }

    #[test]
    fn test_blend_endpoints_are_exact_for_awkward_values() {
        assert_eq!(lerp(1.0, 0.062, 1.0), 0.062);
        assert_eq!(lerp(1.0, 0.062, 0.0), 1.0);
        assert_eq!(lerp(16.0, 15.999, 1.0), 15.999);
        assert_eq!(lerp(3.0, 0.1, 0.0), 3.0);
    }

    #[test]
    fn test_tables_stay_in_range() {
        for pattern in GROOVES.iter() {
            for &position in pattern.positions.iter() {
                assert!(
                    (0.0..=NUM_TAPS as f32).contains(&position),
                    "{} has position {}",
                    pattern.name,
                    position
                );
            }
        }
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in GROOVES.iter().enumerate() {
            for b in GROOVES.iter().skip(i + 1) {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_swing_delays_odd_taps() {
        let swing = groove(1);
        assert_eq!(swing.name, "Swing");
        assert!(swing.position(1, 1.0) > STRAIGHT[1]);
        assert_eq!(swing.position(2, 1.0), STRAIGHT[2]);
        assert!((swing.position(1, 0.5) - 2.125).abs() < 1e-6);
    }

    #[test]
    fn test_last_straight_tap_is_base_time() {
        assert_eq!(groove(0).time_fraction(NUM_TAPS - 1, 0.3), 1.0);
    }

    #[test]
    fn test_groove_index_saturates() {
        assert_eq!(groove(99).name, GROOVES[GROOVES.len() - 1].name);
        assert_eq!(groove_count(), 16);
    }
}
