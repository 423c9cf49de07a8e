//! Renderable geometry - bridges the scene graph to GPU buffers
//!
//! This module flattens the posed scene graph into world-space vertices with
//! their material baked in, plus a shared index list.

use sushirun_core::{Material, PosedMesh, SceneGraph, ScenePose};
use sushirun_math::{mat4, Vec3};
use crate::pipeline::Vertex3D;

/// GPU-ready geometry collected from a scene
pub struct RenderableGeometry {
    /// World-space vertices
    pub vertices: Vec<Vertex3D>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl RenderableGeometry {
    /// Create an empty renderable geometry
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create renderable geometry with pre-allocated capacity
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
        }
    }

    /// Collect geometry from a whole scene under `pose`
    pub fn from_scene(scene: &SceneGraph, pose: &dyn ScenePose) -> Self {
        let mut result = Self::new();
        result.rebuild(scene, pose);
        result
    }

    /// Replace the contents with the scene under `pose`, reusing allocations
    pub fn rebuild(&mut self, scene: &SceneGraph, pose: &dyn ScenePose) {
        self.clear();
        scene.visit_meshes(pose, &mut |mesh| self.add_mesh(&mesh));
    }

    /// Add one posed mesh
    pub fn add_mesh(&mut self, mesh: &PosedMesh<'_>) {
        let shape = mesh.shape;
        let vertex_offset = self.vertices.len() as u32;
        let Material { base_color, emissive, roughness, metalness } = mesh.material;

        for v in shape.vertices() {
            let position = mat4::transform_point(mesh.world, v.position);
            let normal = mat4::transform_vector(mesh.world, v.normal).normalized();
            self.vertices.push(Vertex3D {
                position: position.to_array(),
                normal: normal.to_array(),
                color: base_color,
                emissive,
                roughness,
                metalness,
                _padding: [0.0; 3],
            });
        }

        for tri in shape.triangles() {
            self.indices.extend(tri.indices.iter().map(|&i| i as u32 + vertex_offset));
        }
    }

    /// Clear all geometry
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Get the number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds of all vertices, or None if empty
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min_components(p), hi.max_components(p))))
    }
}

impl Default for RenderableGeometry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sushirun_core::{Binding, RestPose, RunStatus, SceneAnimation, SceneNode, ShapeRef};
    use sushirun_math::{Cuboid, Shape3D};

    fn two_boxes() -> SceneGraph {
        let shape = || ShapeRef::shared(Cuboid::new(1.0, 1.0, 1.0));
        SceneGraph::new(
            SceneNode::group()
                .with_child(SceneNode::mesh(shape(), Material::hex(0xff0000)).at(-2.0, 0.0, 0.0))
                .with_child(SceneNode::mesh(shape(), Material::WHITE).at(2.0, 0.0, 0.0).scaled(2.0)),
        )
    }

    #[test]
    fn test_counts() {
        let geometry = RenderableGeometry::from_scene(&two_boxes(), &RestPose);
        let cube = Cuboid::new(1.0, 1.0, 1.0);
        assert_eq!(geometry.vertex_count(), cube.vertex_count() * 2);
        assert_eq!(geometry.triangle_count(), cube.triangle_count() * 2);
    }

    #[test]
    fn test_indices_offset_per_mesh() {
        let geometry = RenderableGeometry::from_scene(&two_boxes(), &RestPose);
        let max = geometry.indices.iter().copied().max().unwrap();
        assert_eq!(max as usize, geometry.vertex_count() - 1);
        let second_mesh_first = geometry.indices[geometry.indices.len() / 2];
        assert!(second_mesh_first as usize >= geometry.vertex_count() / 2);
    }

    #[test]
    fn test_world_transform_applied() {
        let geometry = RenderableGeometry::from_scene(&two_boxes(), &RestPose);
        let (lo, hi) = geometry.bounds().unwrap();
        assert!((lo.x + 2.5).abs() < 1e-5);
        assert!((hi.x - 3.0).abs() < 1e-5);
        assert!((hi.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_normals_unit_length() {
        let graph = SceneGraph::new(
            SceneNode::group().scaled(0.2).with_child(
                SceneNode::mesh(ShapeRef::owned(Cuboid::new(1.0, 1.0, 1.0)), Material::WHITE)
                    .rotated(0.3, 0.2, 0.1),
            ),
        );
        let geometry = RenderableGeometry::from_scene(&graph, &RestPose);
        for v in &geometry.vertices {
            assert!((Vec3::from_array(v.normal).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_material_baked_into_vertices() {
        let geometry = RenderableGeometry::from_scene(&two_boxes(), &RestPose);
        assert_eq!(geometry.vertices[0].color, Material::hex(0xff0000).base_color);
        assert_eq!(geometry.vertices.last().unwrap().color, Material::WHITE.base_color);
    }

    #[test]
    fn test_rebuild_follows_pose() {
        let graph = SceneGraph::new(
            SceneNode::mesh(ShapeRef::owned(Cuboid::new(0.1, 0.1, 0.1)), Material::WHITE)
                .with_binding(Binding::Led),
        );
        let mut anim = SceneAnimation::default();
        anim.tick(0.0, RunStatus { speed: 2.5, running: true });
        let mut geometry = RenderableGeometry::new();
        geometry.rebuild(&graph, &anim);
        assert_eq!(geometry.vertices[0].color, Material::hex(0xff3300).base_color);

        anim.tick(0.0, RunStatus { speed: 2.5, running: false });
        geometry.rebuild(&graph, &anim);
        assert_eq!(geometry.vertices[0].color, Material::hex(0x666666).base_color);
        assert_eq!(geometry.vertex_count(), 24);
    }
}
