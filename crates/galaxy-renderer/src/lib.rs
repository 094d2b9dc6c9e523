//! # Galaxy Renderer
//!
//! Point-sprite visualization of generated galaxies.

pub mod camera;
pub mod renderer;

pub use camera::*;
pub use renderer::*;
