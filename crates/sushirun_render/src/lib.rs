//! Scene Rendering Library
//!
//! This crate provides the wgpu-based rendering pipeline for the treadmill scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::OrbitCamera`] - Camera orbiting a target with clamped angles
//! - [`pipeline::ScenePipeline`] - Lit mesh rendering with a depth buffer
//! - [`renderable::RenderableGeometry`] - Flattens the posed scene graph into GPU buffers

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod renderable;

// Re-export core types for convenience
pub use sushirun_core::{SceneGraph, ScenePose, Material, Transform3D};

// Re-export renderable for easy access
pub use renderable::RenderableGeometry;
