//! Procedural spiral galaxy point clouds
//!
//! Each point is assigned to an arm by index (`i % branches`) and sits on that
//! arm's straight spoke at a uniformly drawn radius. Because the radius draw
//! is not area-corrected, density rises towards the core. The arm curl seen on
//! screen comes from the time-driven swirl in the vertex shader, not from here.

use crate::params::GalaxyParameters;
use crate::point_cloud::PointCloud;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Generate a galaxy using the thread-local random source
pub fn generate(params: GalaxyParameters) -> PointCloud {
    generate_with_rng(params, &mut rand::rng())
}

/// Generate a galaxy drawing every random value from `rng`.
///
/// Parameters are not validated. A zero radius yields points stacked at the
/// origin with the inside color.
pub fn generate_with_rng<R: Rng + ?Sized>(params: GalaxyParameters, rng: &mut R) -> PointCloud {
    let count = params.count as usize;
    // `% 0` would panic; valid parameters always have at least two arms
    let branches = params.branches.max(1);
    let mut cloud = PointCloud::with_capacity(count);

    for i in 0..params.count {
        let radius = rng.random::<f32>() * params.radius;

        let branch_angle = (i % branches) as f32 / branches as f32 * TAU;
        let position = Vec3::new(branch_angle.cos() * radius, 0.0, branch_angle.sin() * radius);

        let jitter = Vec3::new(
            jitter_axis(rng, params, radius),
            jitter_axis(rng, params, radius),
            jitter_axis(rng, params, radius),
        );

        let t = if params.radius > 0.0 {
            radius / params.radius
        } else {
            0.0
        };
        let color = params.inside_color.lerp(params.outside_color, t);

        let scale = rng.random::<f32>();

        cloud.push(position, color, scale, jitter);
    }

    log::debug!(
        "Generated galaxy: {} points, {} branches, radius {:.2}",
        cloud.len(),
        branches,
        params.radius
    );

    cloud
}

/// One jitter component: `u^power * ±1 * randomness * radius`
fn jitter_axis<R: Rng + ?Sized>(rng: &mut R, params: GalaxyParameters, radius: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(params.randomness_power);
    let sign = if rng.random::<f32>() < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign * params.randomness * radius
}
