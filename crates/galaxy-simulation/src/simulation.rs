//! Two-galaxy frame simulation
//!
//! Every frame the galaxies pull towards each other with a constant-magnitude
//! force and shrink uniformly. The second galaxy receives the counter-pull
//! twice per frame, so it travels at double the rate of the first.

use crate::clock::FrameClock;
use crate::config::SimulationConfig;
use crate::instance::{GalaxyInstance, InstanceTransform};
use galaxy_core::{generate_with_rng, GalaxyParameters};
use glam::Vec3;
use rand::Rng;

/// Collision state machine. `Colliding` currently has no effect beyond
/// pausing the shrink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CollisionPhase {
    #[default]
    Separated,
    Colliding,
}

/// Everything a renderer needs after one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUpdate {
    pub galaxies: [InstanceTransform; 2],
    /// Value both galaxies' time uniforms were set to
    pub time_uniform: f32,
    pub delta: f32,
    /// Force applied to the first galaxy this frame
    pub force: Vec3,
    pub colliding: bool,
}

pub struct DualGalaxySimulator {
    params: GalaxyParameters,
    config: SimulationConfig,
    galaxies: [GalaxyInstance; 2],
    previous_elapsed: f32,
    phase: CollisionPhase,
}

impl DualGalaxySimulator {
    pub fn new(params: GalaxyParameters) -> Self {
        Self::with_config(params, SimulationConfig::default())
    }

    pub fn with_config(params: GalaxyParameters, config: SimulationConfig) -> Self {
        Self::with_rng(params, config, &mut rand::rng())
    }

    /// Generate both galaxies from `rng` and place them at their start heights
    pub fn with_rng<R: Rng + ?Sized>(
        params: GalaxyParameters,
        config: SimulationConfig,
        rng: &mut R,
    ) -> Self {
        let upper = GalaxyInstance::new(
            generate_with_rng(params, rng),
            Vec3::new(0.0, config.upper_height, 0.0),
            params.time_seed,
        );
        let lower = GalaxyInstance::new(
            generate_with_rng(params, rng),
            Vec3::new(0.0, config.lower_height, 0.0),
            params.time_seed,
        );

        log::info!(
            "Created galaxy pair: {} points each at heights {} and {}",
            params.count,
            config.upper_height,
            config.lower_height
        );

        Self {
            params,
            config,
            galaxies: [upper, lower],
            previous_elapsed: 0.0,
            phase: CollisionPhase::Separated,
        }
    }

    /// Advance to `elapsed` seconds since the simulation started
    pub fn tick(&mut self, elapsed: f32) -> FrameUpdate {
        let delta = elapsed - self.previous_elapsed;
        self.previous_elapsed = elapsed;

        let time_uniform = -elapsed;
        for galaxy in &mut self.galaxies {
            galaxy.time_uniform = time_uniform;
        }

        // Measured once, before either galaxy moves
        let displacement = self.galaxies[1].position - self.galaxies[0].position;
        let force = displacement.normalize_or_zero() * self.config.attraction;
        let step = force * delta;

        self.galaxies[0].position += step;
        self.galaxies[1].position -= step;
        self.galaxies[1].position -= step;

        if displacement.length() < self.config.collision_threshold {
            if self.phase != CollisionPhase::Colliding {
                self.phase = CollisionPhase::Colliding;
                log::debug!("Galaxies colliding at t={:.3}", elapsed);
                self.on_collision_enter();
            }
        } else {
            for galaxy in &mut self.galaxies {
                galaxy.shrink(self.config.scale_delta);
            }
            if self.phase == CollisionPhase::Colliding {
                log::debug!("Galaxies separated at t={:.3}", elapsed);
            }
            self.phase = CollisionPhase::Separated;
        }

        FrameUpdate {
            galaxies: [self.galaxies[0].transform(), self.galaxies[1].transform()],
            time_uniform,
            delta,
            force,
            colliding: self.is_colliding(),
        }
    }

    /// Tick with the clock's current elapsed time
    pub fn advance<C: FrameClock + ?Sized>(&mut self, clock: &C) -> FrameUpdate {
        self.tick(clock.elapsed())
    }

    /// Collision response hook, intentionally empty for now.
    /// Reversing `scale_delta` here would make the galaxies grow back.
    fn on_collision_enter(&mut self) {}

    pub fn galaxies(&self) -> &[GalaxyInstance; 2] {
        &self.galaxies
    }

    pub fn galaxies_mut(&mut self) -> &mut [GalaxyInstance; 2] {
        &mut self.galaxies
    }

    pub fn params(&self) -> &GalaxyParameters {
        &self.params
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn phase(&self) -> CollisionPhase {
        self.phase
    }

    pub fn is_colliding(&self) -> bool {
        self.phase == CollisionPhase::Colliding
    }

    /// Elapsed time seen by the last tick
    pub fn elapsed(&self) -> f32 {
        self.previous_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::ATTRACTION;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simulator() -> DualGalaxySimulator {
        let params = GalaxyParameters {
            count: 64,
            ..Default::default()
        };
        DualGalaxySimulator::with_rng(
            params,
            SimulationConfig::default(),
            &mut StdRng::seed_from_u64(7),
        )
    }

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_initial_placement() {
        let sim = simulator();
        let [upper, lower] = sim.galaxies();

        assert_eq!(upper.position, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(lower.position, Vec3::new(0.0, -6.0, 0.0));
        assert_eq!(upper.scale, Vec3::ONE);
        assert_eq!(upper.cloud().len(), 64);
        assert_eq!(lower.cloud().len(), 64);
        assert_ne!(upper.cloud(), lower.cloud());
        assert_eq!(sim.elapsed(), 0.0);
        assert_eq!(sim.phase(), CollisionPhase::Separated);
    }

    #[test]
    fn test_time_uniform_mirrors_clock() {
        let mut sim = simulator();
        assert_eq!(sim.galaxies()[0].time_uniform, 0.0);

        let update = sim.tick(1.5);
        assert_eq!(update.time_uniform, -1.5);
        assert_eq!(sim.galaxies()[0].time_uniform, -1.5);
        assert_eq!(sim.galaxies()[1].time_uniform, -1.5);
    }

    #[test]
    fn test_delta_from_previous_tick() {
        let mut sim = simulator();
        assert_eq!(sim.tick(0.25).delta, 0.25);
        assert_eq!(sim.tick(0.75).delta, 0.5);
        assert_eq!(sim.elapsed(), 0.75);
    }

    #[test]
    fn test_galaxies_pull_together() {
        let mut sim = simulator();
        let update = sim.tick(0.1);

        assert_vec_close(update.force, Vec3::new(0.0, -ATTRACTION, 0.0));
        assert_vec_close(update.galaxies[0].position, Vec3::new(0.0, 2.0 - ATTRACTION * 0.1, 0.0));
        assert_vec_close(
            update.galaxies[1].position,
            Vec3::new(0.0, -6.0 + 2.0 * ATTRACTION * 0.1, 0.0),
        );
    }

    #[test]
    fn test_second_galaxy_moves_twice_as_far() {
        let mut sim = simulator();
        sim.galaxies_mut()[1].position = Vec3::new(3.0, -1.0, 4.0);

        let before = [sim.galaxies()[0].position, sim.galaxies()[1].position];
        sim.tick(0.2);
        let moved_upper = sim.galaxies()[0].position - before[0];
        let moved_lower = sim.galaxies()[1].position - before[1];

        assert_vec_close(moved_lower, moved_upper * -2.0);
        assert!((moved_upper.length() - ATTRACTION * 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_force_magnitude_independent_of_distance() {
        let mut sim = simulator();
        let near = sim.tick(0.1).force.length();

        sim.galaxies_mut()[1].position = Vec3::new(100.0, -50.0, 20.0);
        let far = sim.tick(0.2).force.length();

        assert!((near - far).abs() < 1e-5);
        assert!((near - ATTRACTION).abs() < 1e-5);
    }

    #[test]
    fn test_separated_tick_shrinks_both_uniformly() {
        let mut sim = simulator();
        let before = sim.galaxies()[0].scale;
        let update = sim.tick(0.016);
        let delta = sim.config().scale_delta;

        for transform in update.galaxies {
            assert_eq!(transform.scale, before - Vec3::splat(delta));
            assert_eq!(transform.scale.x, transform.scale.y);
            assert_eq!(transform.scale.y, transform.scale.z);
        }
        assert!(!update.colliding);
    }

    #[test]
    fn test_scale_has_no_floor() {
        let mut sim = simulator();
        // Zero delta keeps the galaxies apart while the scale decays
        for _ in 0..150 {
            sim.tick(0.0);
        }
        assert!(sim.galaxies()[0].scale.x < 0.0);
        assert!(sim.galaxies()[1].scale.z < 0.0);
    }

    #[test]
    fn test_collision_leaves_scale_unchanged() {
        let mut sim = simulator();
        sim.galaxies_mut()[0].position = Vec3::ZERO;
        sim.galaxies_mut()[1].position = Vec3::new(0.005, 0.0, 0.0);

        let update = sim.tick(0.016);

        assert!(update.colliding);
        assert_eq!(sim.phase(), CollisionPhase::Colliding);
        assert_eq!(update.galaxies[0].scale, Vec3::ONE);
        assert_eq!(update.galaxies[1].scale, Vec3::ONE);
    }

    #[test]
    fn test_collision_clears_once_separated() {
        let mut sim = simulator();
        sim.galaxies_mut()[0].position = Vec3::ZERO;
        sim.galaxies_mut()[1].position = Vec3::new(0.0, 0.001, 0.0);
        assert!(sim.tick(0.0).colliding);

        sim.galaxies_mut()[1].position = Vec3::new(0.0, 5.0, 0.0);
        let update = sim.tick(0.0);
        assert!(!update.colliding);
        assert_eq!(sim.phase(), CollisionPhase::Separated);
        assert_eq!(update.galaxies[0].scale, Vec3::splat(1.0 - 0.01));
    }

    #[test]
    fn test_zero_displacement_applies_no_force() {
        let mut sim = simulator();
        let overlap = Vec3::new(1.0, 1.0, 1.0);
        sim.galaxies_mut()[0].position = overlap;
        sim.galaxies_mut()[1].position = overlap;

        let update = sim.tick(0.5);

        assert_eq!(update.force, Vec3::ZERO);
        assert_eq!(update.galaxies[0].position, overlap);
        assert_eq!(update.galaxies[1].position, overlap);
        assert!(update.colliding);
        assert!(update.galaxies[0].position.is_finite());
    }

    #[test]
    fn test_advance_reads_clock() {
        let mut sim = simulator();
        let mut clock = ManualClock::new();
        clock.advance(0.3);
        let update = sim.advance(&clock);
        assert_eq!(update.delta, 0.3);
        assert_eq!(update.time_uniform, -0.3);
    }
}
