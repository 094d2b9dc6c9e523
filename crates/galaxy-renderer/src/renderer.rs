//! Galaxy point rendering system

use crate::camera::{Camera, CameraUniform};
use bytemuck::{Pod, Zeroable};
use galaxy_core::{GalaxyPoint, PointCloud};
use glam::Mat4;
use wgpu::util::DeviceExt;

/// Per-galaxy uniform (matches WGSL `Galaxy`)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GalaxyUniform {
    pub model: [[f32; 4]; 4],
    /// Swirl time, negative elapsed seconds
    pub time: f32,
    /// Base sprite size in pixels
    pub size: f32,
    pub _padding: [f32; 2],
}

impl GalaxyUniform {
    pub fn new(model: Mat4, time: f32, size: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            time,
            size,
            _padding: [0.0; 2],
        }
    }
}

/// GPU buffers of one galaxy instance
pub struct GalaxyMesh {
    point_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    point_count: u32,
}

impl GalaxyMesh {
    /// Upload this frame's transform and uniforms
    pub fn update(&self, queue: &wgpu::Queue, uniform: GalaxyUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Release the GPU buffers immediately instead of waiting for the drop
    pub fn dispose(self) {
        self.point_buffer.destroy();
        self.uniform_buffer.destroy();
        log::debug!("Disposed galaxy mesh with {} points", self.point_count);
    }
}

pub struct GalaxyRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    galaxy_bind_group_layout: wgpu::BindGroupLayout,
    surface_config: wgpu::SurfaceConfiguration,
}

impl GalaxyRenderer {
    pub fn new(device: &wgpu::Device, surface_config: &wgpu::SurfaceConfiguration) -> Self {
        // Create camera buffer
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Galaxy Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/galaxy.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let galaxy_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Galaxy Bind Group Layout"),
                entries: &[
                    // Galaxy (Uniform) - Binding 0
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // Points (Storage) - Binding 1
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: true },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Galaxy Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &galaxy_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Additive, no depth: overlapping points brighten each other
        let additive = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        };

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Galaxy Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vertex"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fragment"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_config.format,
                    blend: Some(wgpu::BlendState {
                        color: additive,
                        alpha: additive,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            galaxy_bind_group_layout,
            surface_config: surface_config.clone(),
        }
    }

    /// Upload a point cloud into a new mesh
    pub fn create_mesh(&self, device: &wgpu::Device, cloud: &PointCloud, label: &str) -> GalaxyMesh {
        let mut points = cloud.to_gpu_points();
        let point_count = points.len() as u32;
        // Zero-sized storage bindings are invalid
        if points.is_empty() {
            points.push(GalaxyPoint::zeroed());
        }

        let point_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Point Buffer")),
            contents: bytemuck::cast_slice(&points),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Uniform Buffer")),
            contents: bytemuck::cast_slice(&[GalaxyUniform::new(Mat4::IDENTITY, 0.0, 0.0)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout: &self.galaxy_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: point_buffer.as_entire_binding(),
                },
            ],
        });

        GalaxyMesh {
            point_buffer,
            uniform_buffer,
            bind_group,
            point_count,
        }
    }

    pub fn resize(&mut self, new_config: &wgpu::SurfaceConfiguration) {
        self.surface_config = new_config.clone();
    }

    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_view: &wgpu::TextureView,
        camera: &Camera,
        pixel_ratio: f32,
        meshes: &[&GalaxyMesh],
    ) {
        let viewport = [
            self.surface_config.width as f32,
            self.surface_config.height as f32,
        ];
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera.to_uniform(viewport, pixel_ratio)]),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Galaxy Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Galaxy Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            for mesh in meshes {
                render_pass.set_bind_group(1, &mesh.bind_group, &[]);
                render_pass.draw(0..6, 0..mesh.point_count);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_galaxy_uniform_layout() {
        assert_eq!(std::mem::size_of::<GalaxyUniform>(), 80);
    }

    #[test]
    fn test_galaxy_uniform_packs_model() {
        let model = Mat4::from_translation(Vec3::new(0.0, -6.0, 0.0));
        let uniform = GalaxyUniform::new(model, -2.5, 35.0);

        assert_eq!(uniform.model[3], [0.0, -6.0, 0.0, 1.0]);
        assert_eq!(uniform.time, -2.5);
        assert_eq!(uniform.size, 35.0);
    }
}
