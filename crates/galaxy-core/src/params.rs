//! Galaxy generation parameters for runtime tuning

use crate::color::Color;
use std::ops::RangeInclusive;

/// Inclusive range and step a tunable is clamped to before regeneration
#[derive(Debug, Clone)]
pub struct ParamRange<T> {
    pub range: RangeInclusive<T>,
    pub step: T,
}

pub const COUNT_RANGE: ParamRange<u32> = ParamRange {
    range: 100..=1_000_000,
    step: 100,
};
pub const RADIUS_RANGE: ParamRange<f32> = ParamRange {
    range: 0.01..=20.0,
    step: 0.01,
};
pub const BRANCHES_RANGE: ParamRange<u32> = ParamRange {
    range: 2..=20,
    step: 1,
};
pub const RANDOMNESS_RANGE: ParamRange<f32> = ParamRange {
    range: 0.0..=2.0,
    step: 0.001,
};
pub const RANDOMNESS_POWER_RANGE: ParamRange<f32> = ParamRange {
    range: 1.0..=10.0,
    step: 0.001,
};
pub const POINT_SIZE_RANGE: ParamRange<f32> = ParamRange {
    range: 0.01..=50.0,
    step: 0.01,
};
pub const TIME_SEED_RANGE: ParamRange<f32> = ParamRange {
    range: 100.0..=1_000_000.0,
    step: 100.0,
};

/// Snapshot of everything that shapes a generated galaxy.
///
/// Passed by value into generation; editing a field never affects a galaxy
/// that already exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalaxyParameters {
    /// Number of points per galaxy
    pub count: u32,
    /// Maximum disc radius
    pub radius: f32,
    /// Number of spiral arms
    pub branches: u32,
    /// Arm curvature. Not consulted by the generator: arms are straight
    /// spokes and the curl comes from the shader swirl.
    pub spin: f32,
    /// Jitter magnitude, relative to each point's radius
    pub randomness: f32,
    /// Jitter falloff exponent (higher concentrates jitter near zero)
    pub randomness_power: f32,
    pub inside_color: Color,
    pub outside_color: Color,
    /// Base sprite size in pixels, before per-point scale and pixel ratio
    pub point_size: f32,
    /// Time uniform value both galaxies start with before the first tick
    pub time_seed: f32,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 200_000,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Color::from_rgb8(0xff, 0x60, 0x30),
            outside_color: Color::from_rgb8(0x1b, 0x39, 0x84),
            point_size: 35.0,
            time_seed: 0.0,
        }
    }
}

impl GalaxyParameters {
    /// Clamp every tunable into its panel range.
    ///
    /// The generator itself never validates, so callers run this before
    /// handing edited parameters over. `time_seed` is left alone when it is
    /// still at its untouched default of zero.
    pub fn clamped(self) -> Self {
        let time_seed = if self.time_seed == 0.0 {
            0.0
        } else {
            clamp_f32(self.time_seed, &TIME_SEED_RANGE)
        };

        Self {
            count: self
                .count
                .clamp(*COUNT_RANGE.range.start(), *COUNT_RANGE.range.end()),
            radius: clamp_f32(self.radius, &RADIUS_RANGE),
            branches: self
                .branches
                .clamp(*BRANCHES_RANGE.range.start(), *BRANCHES_RANGE.range.end()),
            randomness: clamp_f32(self.randomness, &RANDOMNESS_RANGE),
            randomness_power: clamp_f32(self.randomness_power, &RANDOMNESS_POWER_RANGE),
            point_size: clamp_f32(self.point_size, &POINT_SIZE_RANGE),
            time_seed,
            ..self
        }
    }
}

fn clamp_f32(value: f32, range: &ParamRange<f32>) -> f32 {
    if value.is_nan() {
        return *range.range.start();
    }
    value.clamp(*range.range.start(), *range.range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_palette() {
        let params = GalaxyParameters::default();
        assert_eq!(params.inside_color.to_hex(), "#ff6030");
        assert_eq!(params.outside_color.to_hex(), "#1b3984");
        assert_eq!(params.branches, 3);
        assert_eq!(params.count, 200_000);
    }

    #[test]
    fn test_defaults_survive_clamping() {
        let params = GalaxyParameters::default();
        assert_eq!(params.clamped(), params);
    }

    #[test]
    fn test_clamped_pulls_into_range() {
        let params = GalaxyParameters {
            count: 0,
            radius: -1.0,
            branches: 1,
            randomness: 5.0,
            randomness_power: 0.5,
            point_size: f32::NAN,
            time_seed: 5.0,
            ..Default::default()
        }
        .clamped();

        assert_eq!(params.count, 100);
        assert_eq!(params.radius, 0.01);
        assert_eq!(params.branches, 2);
        assert_eq!(params.randomness, 2.0);
        assert_eq!(params.randomness_power, 1.0);
        assert_eq!(params.point_size, 0.01);
        assert_eq!(params.time_seed, 100.0);
    }

    #[test]
    fn test_spin_is_carried_through() {
        let params = GalaxyParameters {
            spin: -3.5,
            ..Default::default()
        };
        assert_eq!(params.clamped().spin, -3.5);
    }
}
