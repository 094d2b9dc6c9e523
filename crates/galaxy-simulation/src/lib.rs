//! # Galaxy Simulation
//!
//! Frame-driven simulation of two galaxies pulled towards each other while
//! shrinking.

pub mod clock;
pub mod config;
pub mod instance;
pub mod simulation;

pub use clock::*;
pub use config::*;
pub use instance::*;
pub use simulation::*;
