//! UV sphere geometry

use std::f32::consts::{PI, TAU};
use crate::{Vec3, shape::{MeshVertex, Shape3D, Triangle}};

/// A UV sphere centered at the origin
#[derive(Clone)]
pub struct Sphere {
    radius: f32,
    vertices: Vec<MeshVertex>,
    triangles: Vec<Triangle>,
}

impl Sphere {
    /// Create a sphere
    ///
    /// # Arguments
    /// * `radius` - sphere radius
    /// * `segments` - longitudinal segments (at least 3)
    /// * `rings` - latitudinal rings (at least 2)
    pub fn new(radius: f32, segments: usize, rings: usize) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let columns = segments + 1;

        let mut vertices = Vec::with_capacity((rings + 1) * columns);
        for j in 0..=rings {
            let theta = j as f32 / rings as f32 * PI;
            for i in 0..=segments {
                let phi = i as f32 / segments as f32 * TAU;
                let normal = Vec3::new(theta.sin() * phi.sin(), theta.cos(), theta.sin() * phi.cos());
                vertices.push(MeshVertex::new(normal * radius, normal));
            }
        }

        let mut triangles = Vec::with_capacity(rings * segments * 2);
        for j in 0..rings {
            for i in 0..segments {
                let a = j * columns + i;
                let b = a + columns;
                let c = b + 1;
                let d = a + 1;
                triangles.push(Triangle::new(a, b, c));
                triangles.push(Triangle::new(a, c, d));
            }
        }

        Self { radius, vertices, triangles }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Shape3D for Sphere {
    fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}
