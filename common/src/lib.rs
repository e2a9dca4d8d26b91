//! Shared graphics plumbing for the solar system visualizer
//!
//! Window/surface/device setup, the free-fly camera, and small GPU buffer
//! helpers live here so the simulation crate only deals with scene content.

pub mod graphics;
pub mod camera;

pub use graphics::*;
pub use camera::*;
