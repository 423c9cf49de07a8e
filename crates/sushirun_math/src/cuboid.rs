//! Axis-aligned box geometry
//!
//! Each face gets its own four vertices so normals stay flat.

use crate::{Vec3, shape::{MeshVertex, Shape3D, Triangle}};

/// An axis-aligned box - pure geometry without colors
#[derive(Clone)]
pub struct Cuboid {
    /// Full extents (width, height, depth)
    size: Vec3,
    vertices: Vec<MeshVertex>,
    triangles: Vec<Triangle>,
}

impl Cuboid {
    /// Create a box centered at the origin
    ///
    /// # Arguments
    /// * `width` - extent along X
    /// * `height` - extent along Y
    /// * `depth` - extent along Z
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let h = Vec3::new(width * 0.5, height * 0.5, depth * 0.5);
        let x = Vec3::new(h.x, 0.0, 0.0);
        let y = Vec3::new(0.0, h.y, 0.0);
        let z = Vec3::new(0.0, 0.0, h.z);

        // (outward offset, u, v) with u x v pointing outward
        let faces = [
            (x, y, z),
            (-x, z, y),
            (y, z, x),
            (-y, x, z),
            (z, x, y),
            (-z, y, x),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);
        for (offset, u, v) in faces {
            let normal = offset.normalized();
            let base = vertices.len();
            vertices.push(MeshVertex::new(offset - u - v, normal));
            vertices.push(MeshVertex::new(offset + u - v, normal));
            vertices.push(MeshVertex::new(offset + u + v, normal));
            vertices.push(MeshVertex::new(offset - u + v, normal));
            triangles.push(Triangle::new(base, base + 1, base + 2));
            triangles.push(Triangle::new(base, base + 2, base + 3));
        }

        Self {
            size: Vec3::new(width, height, depth),
            vertices,
            triangles,
        }
    }

    /// Get the full extents
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.size
    }
}

impl Shape3D for Cuboid {
    fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}
