//! Shape traits and primitives for 3D geometry
//!
//! Shapes are pure geometric data - no colors, materials, or rendering info.
//! Every shape is centered on its local origin.

use crate::Vec3;

/// A mesh vertex with its outward surface normal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl MeshVertex {
    #[inline]
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// A triangle defined by vertex indices, counter-clockwise when viewed from outside
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Indices into the parent shape's vertex array
    pub indices: [usize; 3],
}

impl Triangle {
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }
}

/// Trait for closed 3D shapes that can be drawn
///
/// Shapes are pure geometry - they contain no rendering-specific data
/// like colors or materials. That information lives in the scene graph.
pub trait Shape3D: Send + Sync {
    /// Get the vertices of this shape
    fn vertices(&self) -> &[MeshVertex];

    /// Get the triangles of this shape
    fn triangles(&self) -> &[Triangle];

    /// Get the number of vertices
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Get the number of triangles
    #[inline]
    fn triangle_count(&self) -> usize {
        self.triangles().len()
    }

    /// Axis-aligned bounds `(min, max)` in local space
    fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vec3::new(f32::MIN, f32::MIN, f32::MIN);
        for v in self.vertices() {
            min = min.min_components(v.position);
            max = max.max_components(v.position);
        }
        (min, max)
    }
}

/// Test helper: every non-degenerate triangle winds counter-clockwise
/// around the normals of its vertices
#[cfg(test)]
pub(crate) fn assert_outward_winding(shape: &dyn Shape3D) {
    let verts = shape.vertices();
    for (i, tri) in shape.triangles().iter().enumerate() {
        let [a, b, c] = tri.indices.map(|idx| verts[idx]);
        let face = (b.position - a.position).cross(c.position - a.position);
        if face.length() < 1e-7 {
            continue; // pole triangles of a sphere collapse to a line
        }
        let avg_normal = a.normal + b.normal + c.normal;
        assert!(
            face.dot(avg_normal) > 0.0,
            "triangle {} winds inward: face {:?}, normal {:?}",
            i, face, avg_normal
        );
    }
}
