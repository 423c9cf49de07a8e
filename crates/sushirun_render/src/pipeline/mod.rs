//! Rendering pipeline components
//!
//! This module contains the lit mesh pipeline and its GPU data types.

pub mod types;
pub mod scene_pipeline;

// Re-export types
pub use types::{SceneUniforms, Vertex3D};

// Re-export pipelines
pub use scene_pipeline::ScenePipeline;
