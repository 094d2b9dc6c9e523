//! Orbit camera for 3D visualization

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3};

/// Camera uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// Surface size in physical pixels
    pub viewport: [f32; 2],
    /// Device pixel ratio, capped at 2
    pub pixel_ratio: f32,
    pub _padding: f32,
}

/// Camera orbiting `target` at `distance`
pub struct Camera {
    pub distance: f32,
    pub rotation: Quat,
    pub target: Vec3,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Fraction of the pending rotation applied per update; 0 disables damping
    pub damping: f32,
    pending_rotation: Vec2,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self::look_from(Vec3::new(3.0, 3.0, 9.0), Vec3::ZERO, width, height)
    }

    /// Place the camera at `eye`, facing `target`
    pub fn look_from(eye: Vec3, target: Vec3, width: u32, height: u32) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(1e-3);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let rotation = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(-pitch);

        Self {
            distance,
            rotation,
            target,
            aspect: width as f32 / height.max(1) as f32,
            fovy: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 100.0,
            damping: 0.05,
            pending_rotation: Vec2::ZERO,
        }
    }

    pub fn position(&self) -> Vec3 {
        let offset = self.rotation * Vec3::new(0.0, 0.0, self.distance);
        self.target + offset
    }

    /// Queue a rotation; applied gradually by [`Camera::update`] when damped
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        if self.damping > 0.0 {
            self.pending_rotation += Vec2::new(delta_x, delta_y);
        } else {
            self.apply_rotation(delta_x, delta_y);
        }
    }

    /// Advance damping by one frame
    pub fn update(&mut self) {
        if self.damping <= 0.0 {
            return;
        }

        let step = self.pending_rotation * self.damping;
        self.apply_rotation(step.x, step.y);
        self.pending_rotation *= 1.0 - self.damping;

        if self.pending_rotation.length_squared() < 1e-10 {
            self.pending_rotation = Vec2::ZERO;
        }
    }

    fn apply_rotation(&mut self, delta_x: f32, delta_y: f32) {
        let up = self.rotation * Vec3::Y;
        let yaw_rotation = Quat::from_axis_angle(up, delta_x);

        let right = self.rotation * Vec3::X;
        let pitch_rotation = Quat::from_axis_angle(right, -delta_y);

        self.rotation = yaw_rotation * pitch_rotation * self.rotation;
        self.rotation = self.rotation.normalize();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(0.5, self.zfar * 0.9);
    }

    pub fn build_view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position());
        rotation_matrix * translation_matrix
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * self.build_view_matrix()
    }

    pub fn to_uniform(&self, viewport: [f32; 2], pixel_ratio: f32) -> CameraUniform {
        CameraUniform {
            view_proj: self.build_view_projection_matrix().to_cols_array_2d(),
            view: self.build_view_matrix().to_cols_array_2d(),
            viewport,
            pixel_ratio,
            _padding: 0.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_from_recovers_eye() {
        let camera = Camera::new(1920, 1080);
        let position = camera.position();
        assert!((position - Vec3::new(3.0, 3.0, 9.0)).length() < 1e-4, "{position:?}");
    }

    #[test]
    fn test_target_is_in_front_of_camera() {
        let camera = Camera::new(800, 600);
        let view_target = camera.build_view_matrix().transform_point3(Vec3::ZERO);
        assert!(view_target.z < 0.0);
        assert!(view_target.x.abs() < 1e-4);
        assert!(view_target.y.abs() < 1e-4);
    }

    #[test]
    fn test_damped_rotation_converges() {
        let mut camera = Camera::new(800, 600);
        let start = camera.position();
        camera.rotate(0.5, 0.0);
        assert_eq!(camera.position(), start);

        for _ in 0..500 {
            camera.update();
        }
        let moved = camera.position();
        assert!((moved - start).length() > 1.0);
        assert!((moved.length() - start.length()).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new(800, 600);
        camera.zoom(-1000.0);
        assert_eq!(camera.distance, 0.5);
        camera.zoom(1000.0);
        assert_eq!(camera.distance, 90.0);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
        let uniform = Camera::new(100, 50).to_uniform([100.0, 50.0], 2.0);
        assert_eq!(uniform.viewport, [100.0, 50.0]);
        assert_eq!(uniform.pixel_ratio, 2.0);
    }
}
