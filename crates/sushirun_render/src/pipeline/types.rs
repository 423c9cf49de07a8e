//! GPU-compatible data types for the scene pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use sushirun_math::mat4;

/// A world-space vertex with its surface properties baked in
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex3D {
    /// Position in world space (x, y, z)
    pub position: [f32; 3],
    /// Unit surface normal in world space
    pub normal: [f32; 3],
    /// Linear RGBA base color
    pub color: [f32; 4],
    /// Linear RGB emitted light
    pub emissive: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    /// Padding to a 16-byte multiple
    pub _padding: [f32; 3],
}

impl Default for Vertex3D {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0, 1.0, 0.0],
            color: [1.0; 4],
            emissive: [0.0; 3],
            roughness: 1.0,
            metalness: 0.0,
            _padding: [0.0; 3],
        }
    }
}

/// Per-frame uniforms
/// Layout: 112 bytes total (must match scene.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// Camera position + ambient strength (16 bytes)
    pub camera_pos: [f32; 3],
    pub ambient_strength: f32,
    /// Direction *towards* the light + diffuse strength (16 bytes)
    pub light_dir: [f32; 3],
    pub diffuse_strength: f32,
    /// Specular strength + padding (16 bytes)
    pub specular_strength: f32,
    pub _padding: [f32; 3],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
            camera_pos: [0.0, 0.0, 5.0],
            ambient_strength: 0.5,
            light_dir: [10.0, 10.0, 5.0],
            diffuse_strength: 0.8,
            specular_strength: 0.5,
            _padding: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex3d_size() {
        // 3 position + 3 normal + 4 color + 3 emissive + roughness + metalness + 3 padding
        // = 16 floats = 64 bytes
        assert_eq!(size_of::<Vertex3D>(), 64);
    }

    #[test]
    fn test_scene_uniforms_size() {
        // 16 floats matrix + 4 + 4 + 4 = 28 floats = 112 bytes
        assert_eq!(size_of::<SceneUniforms>(), 112);
        assert_eq!(size_of::<SceneUniforms>() % 16, 0);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<Vertex3D>(), 4);
        assert_eq!(std::mem::align_of::<SceneUniforms>(), 4);
    }
}
