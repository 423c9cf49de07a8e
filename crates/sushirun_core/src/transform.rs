//! 3D Transform (position, rotation, scale)
//!
//! A Transform3D represents the placement of a scene node relative to its parent.

use sushirun_math::{mat4, Mat4, Vec3};
use serde::{Serialize, Deserialize};

/// A 3D transform with position, Euler rotation, and uniform scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Position relative to the parent
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order
    pub rotation: Vec3,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create an identity transform (no translation, rotation, or scale change)
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Builder: set the Euler rotation
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set the uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-parent matrix: scale, then rotation, then translation
    pub fn to_matrix(&self) -> Mat4 {
        let rs = mat4::mul(mat4::euler_xyz(self.rotation), mat4::scale(self.scale));
        mat4::mul(mat4::translation(self.position), rs)
    }

    /// Transform a point from local space to parent space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        mat4::transform_point(self.to_matrix(), p)
    }

    /// Translate the transform by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }
}
