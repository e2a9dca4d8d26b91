//! Interactive 3D solar system with N-body gravitational dynamics
//!
//! The physics layer (`bodies`, `physics`) works in SI units on f64 state
//! and knows nothing about the screen; the rendering layer (`renderer`,
//! `rings`) reads body positions after each step and applies display
//! scaling on its own side.

pub mod bodies;
pub mod config;
pub mod ephemeris;
pub mod physics;
pub mod renderer;
pub mod rings;
