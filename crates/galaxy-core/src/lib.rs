//! # Galaxy Core
//!
//! Parameters, colors and the procedural point-cloud generator for spiral
//! galaxies.

pub mod color;
pub mod generator;
pub mod params;
pub mod point_cloud;

pub use color::*;
pub use generator::*;
pub use params::*;
pub use point_cloud::*;
