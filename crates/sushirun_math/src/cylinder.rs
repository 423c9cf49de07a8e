//! Capped cylinder geometry, axis along Y

use std::f32::consts::TAU;
use crate::{Vec3, shape::{MeshVertex, Shape3D, Triangle}};

/// A closed cylinder centered at the origin with its axis along Y
#[derive(Clone)]
pub struct Cylinder {
    radius: f32,
    height: f32,
    vertices: Vec<MeshVertex>,
    triangles: Vec<Triangle>,
}

impl Cylinder {
    /// Create a cylinder
    ///
    /// # Arguments
    /// * `radius` - radius of both caps
    /// * `height` - extent along Y
    /// * `segments` - number of radial segments (at least 3)
    pub fn new(radius: f32, height: f32, segments: usize) -> Self {
        let segments = segments.max(3);
        let half = height * 0.5;
        let ring = |i: usize| {
            let theta = i as f32 / segments as f32 * TAU;
            (theta.sin(), theta.cos())
        };

        let mut vertices = Vec::new();
        let mut triangles = Vec::new();

        // Side wall: smooth normals, seam duplicated at i == segments
        for i in 0..=segments {
            let (s, c) = ring(i);
            let normal = Vec3::new(s, 0.0, c);
            vertices.push(MeshVertex::new(Vec3::new(radius * s, -half, radius * c), normal));
            vertices.push(MeshVertex::new(Vec3::new(radius * s, half, radius * c), normal));
        }
        for i in 0..segments {
            let bottom = i * 2;
            let top = bottom + 1;
            let next_bottom = bottom + 2;
            let next_top = bottom + 3;
            triangles.push(Triangle::new(bottom, next_bottom, next_top));
            triangles.push(Triangle::new(bottom, next_top, top));
        }

        // Caps: flat normals, triangle fan around a center vertex
        for (y, normal) in [(half, Vec3::Y), (-half, -Vec3::Y)] {
            let center = vertices.len();
            vertices.push(MeshVertex::new(Vec3::new(0.0, y, 0.0), normal));
            for i in 0..=segments {
                let (s, c) = ring(i);
                vertices.push(MeshVertex::new(Vec3::new(radius * s, y, radius * c), normal));
            }
            for i in 0..segments {
                let a = center + 1 + i;
                let b = a + 1;
                if y > 0.0 {
                    triangles.push(Triangle::new(center, a, b));
                } else {
                    triangles.push(Triangle::new(center, b, a));
                }
            }
        }

        Self { radius, height, vertices, triangles }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Shape3D for Cylinder {
    fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::assert_outward_winding;

    #[test]
    fn test_cylinder_counts() {
        let c = Cylinder::new(0.08, 1.8, 16);
        // side: 17 * 2, caps: 2 * (1 + 17)
        assert_eq!(c.vertex_count(), 34 + 36);
        // side: 16 * 2, caps: 2 * 16
        assert_eq!(c.triangle_count(), 64);
    }

    #[test]
    fn test_cylinder_bounds() {
        let c = Cylinder::new(0.5, 2.0, 32);
        let (min, max) = c.bounds();
        assert!((min.y + 1.0).abs() < 1e-6);
        assert!((max.y - 1.0).abs() < 1e-6);
        assert!((max.x - 0.5).abs() < 1e-3);
        assert!((max.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cylinder_winding() {
        assert_outward_winding(&Cylinder::new(0.05, 0.02, 16));
    }

    #[test]
    fn test_min_segments() {
        let c = Cylinder::new(1.0, 1.0, 1);
        assert_eq!(c.triangle_count(), 12);
    }
}
