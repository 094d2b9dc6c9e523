//! Simulation constants

/// Attraction magnitude between the two galaxy centroids.
/// Constant with respect to distance; folds to roughly 1.2185.
pub const ATTRACTION: f32 = (300.0 / 6.99) % 7.0 + 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Amount subtracted from every scale axis per separated frame
    pub scale_delta: f32,
    /// Centroid distance below which the galaxies count as colliding
    pub collision_threshold: f32,
    /// Initial height of the first galaxy
    pub upper_height: f32,
    /// Initial height of the second galaxy
    pub lower_height: f32,
    pub attraction: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scale_delta: 0.01,
            collision_threshold: 0.01,
            upper_height: 2.0,
            lower_height: -6.0,
            attraction: ATTRACTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attraction_constant() {
        assert!((ATTRACTION - 1.2185).abs() < 1e-3);
        assert_eq!(SimulationConfig::default().attraction, ATTRACTION);
    }
}
