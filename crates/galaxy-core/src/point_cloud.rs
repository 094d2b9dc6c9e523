//! Generated point cloud and its GPU layout

use crate::color::Color;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Per-point attributes of one galaxy, stored as parallel arrays.
///
/// All four arrays always share the same length. `jitter` is kept apart from
/// `positions` so the renderer can apply it per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Color>,
    pub scales: Vec<f32>,
    pub jitter: Vec<Vec3>,
}

impl PointCloud {
    pub fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            scales: Vec::with_capacity(count),
            jitter: Vec::with_capacity(count),
        }
    }

    pub fn push(&mut self, position: Vec3, color: Color, scale: f32, jitter: Vec3) {
        self.positions.push(position);
        self.colors.push(color);
        self.scales.push(scale);
        self.jitter.push(jitter);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Interleave the attribute arrays into the storage-buffer layout
    pub fn to_gpu_points(&self) -> Vec<GalaxyPoint> {
        self.positions
            .iter()
            .zip(&self.colors)
            .zip(&self.scales)
            .zip(&self.jitter)
            .map(|(((position, color), scale), jitter)| GalaxyPoint {
                position: position.to_array(),
                scale: *scale,
                color: color.to_array(),
                _padding0: 0.0,
                jitter: jitter.to_array(),
                _padding1: 0.0,
            })
            .collect()
    }
}

/// GPU-compatible point structure
/// Aligned for WGSL struct compatibility (vec3 + f32 per row)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GalaxyPoint {
    /// Disc position, y is always 0
    pub position: [f32; 3],
    /// Sprite size multiplier in [0, 1)
    pub scale: f32,

    pub color: [f32; 3],
    pub _padding0: f32,

    /// Offset added in the vertex shader
    pub jitter: [f32; 3],
    pub _padding1: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_point_layout() {
        assert_eq!(std::mem::size_of::<GalaxyPoint>(), 48);
        assert_eq!(std::mem::align_of::<GalaxyPoint>(), 4);
    }

    #[test]
    fn test_to_gpu_points_interleaves() {
        let mut cloud = PointCloud::with_capacity(2);
        cloud.push(Vec3::new(1.0, 0.0, 2.0), Color::WHITE, 0.25, Vec3::splat(0.5));
        cloud.push(Vec3::new(-1.0, 0.0, 0.0), Color::BLACK, 0.75, Vec3::ZERO);

        let points = cloud.to_gpu_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].position, [1.0, 0.0, 2.0]);
        assert_eq!(points[0].scale, 0.25);
        assert_eq!(points[0].color, [1.0, 1.0, 1.0]);
        assert_eq!(points[0].jitter, [0.5, 0.5, 0.5]);
        assert_eq!(points[1].scale, 0.75);
        assert_eq!(bytemuck::cast_slice::<GalaxyPoint, u8>(&points).len(), 96);
    }

    #[test]
    fn test_empty_cloud() {
        let cloud = PointCloud::default();
        assert!(cloud.is_empty());
        assert!(cloud.to_gpu_points().is_empty());
    }
}
