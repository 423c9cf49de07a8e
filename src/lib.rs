//! Sushi Run Club - a treadmill running tracker with a 3D sushi scene
//!
//! The binary wires these modules into a winit application; they are exposed
//! as a library so integration tests can exercise configuration and session
//! handling without a window.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
pub mod ui;
