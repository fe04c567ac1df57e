//! Dry/wet crossfades and the tap pan law.

/*
Wet/Dry Mixing
==============

  dry   the input signal, untouched
  wet   the sum of every active tap after filtering, level and pan

The final output crossfades between the two with one `mix` control:

    mix = 0.0  →  100% dry
    mix = 1.0  →  100% wet


Linear vs Equal-Power Crossfade
-------------------------------

LINEAR (the default):

    dry_gain = 1.0 - mix
    wet_gain = mix

    The gains always sum to 1.0. For correlated material (the dry signal and
    its own short echoes) this keeps the level steady. For uncorrelated
    material the loudness dips around mix = 0.5.

EQUAL-POWER:

    dry_gain = cos(mix × π/2)
    wet_gain = sin(mix × π/2)

    The squared gains sum to 1.0, so uncorrelated dry and wet keep constant
    perceived loudness. At mix = 0.5 both sit at ~0.707.


Tap Pan Law
-----------

Each tap has one pan value in 0..1 and contributes to both channels:

    pan     0.0    0.25    0.5    0.75    1.0
    left    1.0    1.0     1.0    0.5     0.0
    right   0.0    0.5     1.0    1.0     1.0

The weight for the right channel is the left weight with the knob inverted,
so the law is symmetric about the centre, where the tap sits at unity in
both channels.
*/

use std::f32::consts::FRAC_PI_2;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixLaw {
    #[default]
    Linear,
    EqualPower,
}

/// Blend dry and wet samples using linear crossfade.
///
/// output = (dry × (1-mix)) + (wet × mix)
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    let mix = mix.clamp(0.0, 1.0);
    dry * (1.0 - mix) + wet * mix
}

/// Blend dry and wet samples keeping constant power.
#[inline]
pub fn blend_equal_power(dry: f32, wet: f32, mix: f32) -> f32 {
    let angle = mix.clamp(0.0, 1.0) * FRAC_PI_2;
    dry * angle.cos() + wet * angle.sin()
}

#[inline]
pub fn crossfade(dry: f32, wet: f32, mix: f32, law: MixLaw) -> f32 {
    match law {
        MixLaw::Linear => blend_dry_wet(dry, wet, mix),
        MixLaw::EqualPower => blend_equal_power(dry, wet, mix),
    }
}

/// Channel weight for one side of the pan law. `channel` 0 is left.
#[inline]
pub fn pan_weight(pan: f32, channel: usize) -> f32 {
    let pan = pan.clamp(0.0, 1.0);
    let toward = if channel == 0 { 1.0 - pan } else { pan };
    (2.0 * toward).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_dry_wet() {
        // All dry
        assert_eq!(blend_dry_wet(1.0, 0.5, 0.0), 1.0);
        // All wet
        assert_eq!(blend_dry_wet(1.0, 0.5, 1.0), 0.5);
        // 50/50 mix
        assert_eq!(blend_dry_wet(1.0, 0.0, 0.5), 0.5);
    }

    #[test]
    fn test_mix_clamped() {
        assert_eq!(blend_dry_wet(1.0, 0.0, 2.0), 0.0);
        assert_eq!(blend_dry_wet(1.0, 0.0, -1.0), 1.0);
    }

    #[test]
    fn test_weights_sum_to_one() {
        // (1.0 × 0.5) + (1.0 × 0.5) = 1.0, not 2.0
        assert_eq!(blend_dry_wet(1.0, 1.0, 0.5), 1.0);
    }

    #[test]
    fn test_equal_power_endpoints_and_centre() {
        assert!((blend_equal_power(1.0, 0.0, 0.0) - 1.0).abs() < 1e-6);
        assert!(blend_equal_power(1.0, 0.0, 1.0).abs() < 1e-6);
        let centre = blend_equal_power(1.0, 0.0, 0.5);
        assert!((centre - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn test_crossfade_dispatches_on_law() {
        assert_eq!(crossfade(1.0, 0.0, 0.5, MixLaw::Linear), 0.5);
        assert!(crossfade(1.0, 0.0, 0.5, MixLaw::EqualPower) > 0.7);
    }

    #[test]
    fn test_pan_centre_is_unity() {
        assert_eq!(pan_weight(0.5, 0), 1.0);
        assert_eq!(pan_weight(0.5, 1), 1.0);
    }

    #[test]
    fn test_pan_hard_sides() {
        assert_eq!((pan_weight(0.0, 0), pan_weight(0.0, 1)), (1.0, 0.0));
        assert_eq!((pan_weight(1.0, 0), pan_weight(1.0, 1)), (0.0, 1.0));
    }

    #[test]
    fn test_pan_is_symmetric() {
        for step in 0..=20 {
            let pan = step as f32 / 20.0;
            let (left, right) = (pan_weight(pan, 0), pan_weight(pan, 1));
            let (mirror_left, mirror_right) = (pan_weight(1.0 - pan, 0), pan_weight(1.0 - pan, 1));
            assert!((left - mirror_right).abs() < 1e-6);
            assert!((right - mirror_left).abs() < 1e-6);
            assert!((0.0..=1.0).contains(&left) && (0.0..=1.0).contains(&right));
        }
    }
}
