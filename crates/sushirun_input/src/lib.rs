//! Orbit camera input
//!
//! This crate turns pointer drags and wheel scrolls into orbit rotation and
//! zoom, with damping and optional continuous auto-rotation.

mod orbit_controller;

pub use orbit_controller::{OrbitController, OrbitControl};
