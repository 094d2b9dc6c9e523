//! A generated galaxy placed in the world

use galaxy_core::PointCloud;
use glam::{Mat4, Quat, Vec3};

/// World-space placement of a galaxy for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl InstanceTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }
}

/// Point cloud plus the per-frame state the simulator mutates
#[derive(Clone, Debug)]
pub struct GalaxyInstance {
    cloud: PointCloud,
    pub position: Vec3,
    /// Decays every frame with no floor; negative values mirror the galaxy
    pub scale: Vec3,
    pub time_uniform: f32,
}

impl GalaxyInstance {
    pub fn new(cloud: PointCloud, position: Vec3, time_uniform: f32) -> Self {
        Self {
            cloud,
            position,
            scale: Vec3::ONE,
            time_uniform,
        }
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn transform(&self) -> InstanceTransform {
        InstanceTransform {
            position: self.position,
            scale: self.scale,
        }
    }

    /// Subtract `delta` from every scale axis
    pub fn shrink(&mut self, delta: f32) {
        self.scale -= Vec3::splat(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_instance_is_unit_scale() {
        let instance = GalaxyInstance::new(PointCloud::default(), Vec3::Y * 2.0, 7.0);
        assert_eq!(instance.scale, Vec3::ONE);
        assert_eq!(instance.position, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(instance.time_uniform, 7.0);
        assert!(instance.cloud().is_empty());
    }

    #[test]
    fn test_shrink_goes_negative() {
        let mut instance = GalaxyInstance::new(PointCloud::default(), Vec3::ZERO, 0.0);
        instance.shrink(0.75);
        instance.shrink(0.75);
        assert_eq!(instance.scale, Vec3::splat(-0.5));
    }

    #[test]
    fn test_model_matrix() {
        let transform = InstanceTransform {
            position: Vec3::new(0.0, -6.0, 0.0),
            scale: Vec3::splat(0.5),
        };
        let point = transform.model_matrix().transform_point3(Vec3::new(2.0, 0.0, 4.0));
        assert!((point - Vec3::new(1.0, -6.0, 2.0)).length() < 1e-6);
    }
}
