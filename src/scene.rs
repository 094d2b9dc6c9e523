//! The running galaxy pair: simulator, its clock and the GPU meshes.

use galaxy_core::GalaxyParameters;
use galaxy_renderer::{GalaxyMesh, GalaxyRenderer, GalaxyUniform};
use galaxy_simulation::{DualGalaxySimulator, FrameUpdate, SystemClock};

pub struct GalaxyScene {
    simulator: DualGalaxySimulator,
    meshes: [GalaxyMesh; 2],
    clock: SystemClock,
}

impl GalaxyScene {
    /// Generate both galaxies, upload them and start a fresh clock
    pub fn new(device: &wgpu::Device, renderer: &GalaxyRenderer, params: GalaxyParameters) -> Self {
        let simulator = DualGalaxySimulator::new(params);
        let [upper, lower] = simulator.galaxies();
        let meshes = [
            renderer.create_mesh(device, upper.cloud(), "Upper Galaxy"),
            renderer.create_mesh(device, lower.cloud(), "Lower Galaxy"),
        ];

        log::info!("✓ Galaxies generated ({} points each)", params.count);

        Self {
            simulator,
            meshes,
            clock: SystemClock::new(),
        }
    }

    /// Step the simulation to the clock's current time and upload the result
    pub fn update(&mut self, queue: &wgpu::Queue) -> FrameUpdate {
        let update = self.simulator.advance(&self.clock);
        let point_size = self.simulator.params().point_size;

        for (mesh, transform) in self.meshes.iter().zip(update.galaxies) {
            mesh.update(
                queue,
                GalaxyUniform::new(transform.model_matrix(), update.time_uniform, point_size),
            );
        }

        update
    }

    pub fn meshes(&self) -> [&GalaxyMesh; 2] {
        [&self.meshes[0], &self.meshes[1]]
    }

    pub fn simulator(&self) -> &DualGalaxySimulator {
        &self.simulator
    }

    /// Release GPU buffers; the scene is gone afterwards
    pub fn dispose(self) {
        let [upper, lower] = self.meshes;
        upper.dispose();
        lower.dispose();
    }
}
