//! Scene graph
//!
//! The scene is an immutable tree built once at startup. Nodes that move or
//! change color carry a [`Binding`]; each frame a [`ScenePose`] supplies the
//! transform and material for every bound node, so nothing in the tree is
//! mutated after construction.

use std::sync::Arc;
use sushirun_math::{mat4, Mat4, Shape3D, Vec3};
use crate::{Material, Transform3D};

/// Reference to a shape - either shared (Arc) or owned (Box)
///
/// Use `Shared` when many nodes draw the same geometry (tread segments, feet).
pub enum ShapeRef {
    /// A shared reference to a shape
    Shared(Arc<dyn Shape3D>),
    /// An owned shape (unique to this node)
    Owned(Box<dyn Shape3D>),
}

impl ShapeRef {
    /// Create a shared shape reference
    pub fn shared<S: Shape3D + 'static>(shape: S) -> Self {
        Self::Shared(Arc::new(shape))
    }

    /// Create an owned shape reference
    pub fn owned<S: Shape3D + 'static>(shape: S) -> Self {
        Self::Owned(Box::new(shape))
    }

    /// Get a reference to the underlying shape
    pub fn as_shape(&self) -> &dyn Shape3D {
        match self {
            ShapeRef::Shared(arc) => arc.as_ref(),
            ShapeRef::Owned(boxed) => boxed.as_ref(),
        }
    }
}

/// Which animated quantity drives a node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Node never changes
    #[default]
    Static,
    /// Belt tread segment with the given index
    Tread(usize),
    /// Decorative prop with the given index
    Prop(usize),
    /// Console LED whose color follows the run state
    Led,
}

/// Drawable leaf: a shape with a material
pub struct MeshNode {
    pub shape: ShapeRef,
    pub material: Material,
}

/// Node payload
pub enum NodeKind {
    Mesh(MeshNode),
    Group(Vec<SceneNode>),
}

/// A node in the scene tree
pub struct SceneNode {
    /// Optional name (for lookup and logs)
    pub name: Option<String>,
    /// Rest transform relative to the parent
    pub transform: Transform3D,
    /// Animation binding
    pub binding: Binding,
    pub kind: NodeKind,
}

impl SceneNode {
    /// Create a mesh leaf at the origin
    pub fn mesh(shape: ShapeRef, material: Material) -> Self {
        Self {
            name: None,
            transform: Transform3D::identity(),
            binding: Binding::Static,
            kind: NodeKind::Mesh(MeshNode { shape, material }),
        }
    }

    /// Create an empty group at the origin
    pub fn group() -> Self {
        Self {
            name: None,
            transform: Transform3D::identity(),
            binding: Binding::Static,
            kind: NodeKind::Group(Vec::new()),
        }
    }

    /// Set the name of this node
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the position relative to the parent
    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vec3::new(x, y, z);
        self
    }

    /// Set the Euler rotation relative to the parent
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Vec3::new(x, y, z);
        self
    }

    /// Set the uniform scale
    pub fn scaled(mut self, scale: f32) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Attach an animation binding
    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    /// Append a child (no-op with a warning on mesh nodes)
    pub fn with_child(mut self, child: SceneNode) -> Self {
        match &mut self.kind {
            NodeKind::Group(children) => children.push(child),
            NodeKind::Mesh(_) => {
                log::warn!("Ignoring child added to mesh node {:?}", self.name);
            }
        }
        self
    }

    /// Append several children
    pub fn with_children(self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        children.into_iter().fold(self, |node, child| node.with_child(child))
    }

    /// Children of a group (empty for meshes)
    pub fn children(&self) -> &[SceneNode] {
        match &self.kind {
            NodeKind::Group(children) => children,
            NodeKind::Mesh(_) => &[],
        }
    }
}

/// Supplies per-frame transforms and materials for bound nodes
pub trait ScenePose {
    /// Transform to use for a node, given its rest transform
    fn transform(&self, binding: Binding, rest: &Transform3D) -> Transform3D;

    /// Material to use for a mesh, given its authored material
    fn material(&self, binding: Binding, authored: &Material) -> Material;
}

/// Pose that leaves every node at rest
pub struct RestPose;

impl ScenePose for RestPose {
    fn transform(&self, _binding: Binding, rest: &Transform3D) -> Transform3D {
        *rest
    }

    fn material(&self, _binding: Binding, authored: &Material) -> Material {
        *authored
    }
}

/// A visited mesh with its resolved world matrix and material
pub struct PosedMesh<'a> {
    pub shape: &'a dyn Shape3D,
    pub world: Mat4,
    pub material: Material,
    pub name: Option<&'a str>,
}

/// Immutable scene tree
pub struct SceneGraph {
    root: SceneNode,
}

impl SceneGraph {
    /// Wrap a root node
    pub fn new(root: SceneNode) -> Self {
        Self { root }
    }

    /// Get the root node
    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    /// Visit every mesh depth-first with its world matrix under `pose`
    pub fn visit_meshes<'a>(&'a self, pose: &dyn ScenePose, f: &mut dyn FnMut(PosedMesh<'a>)) {
        Self::visit_node(&self.root, mat4::IDENTITY, Binding::Static, pose, f);
    }

    fn visit_node<'a>(
        node: &'a SceneNode,
        parent: Mat4,
        inherited: Binding,
        pose: &dyn ScenePose,
        f: &mut dyn FnMut(PosedMesh<'a>),
    ) {
        let local = pose.transform(node.binding, &node.transform);
        let world = mat4::mul(parent, local.to_matrix());
        // A mesh inside a bound group reports the group's binding for material lookups
        let binding = if node.binding == Binding::Static { inherited } else { node.binding };

        match &node.kind {
            NodeKind::Mesh(mesh) => f(PosedMesh {
                shape: mesh.shape.as_shape(),
                world,
                material: pose.material(binding, &mesh.material),
                name: node.name.as_deref(),
            }),
            NodeKind::Group(children) => {
                for child in children {
                    Self::visit_node(child, world, binding, pose, f);
                }
            }
        }
    }

    /// Number of mesh leaves in the tree
    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.visit_meshes(&RestPose, &mut |_| count += 1);
        count
    }

    /// Number of nodes carrying `binding`
    pub fn binding_count(&self, binding: Binding) -> usize {
        fn count(node: &SceneNode, binding: Binding) -> usize {
            let own = usize::from(node.binding == binding);
            own + node.children().iter().map(|c| count(c, binding)).sum::<usize>()
        }
        count(&self.root, binding)
    }

    /// World-space axis-aligned bounds `(min, max)` under `pose`, or None if empty
    pub fn bounds(&self, pose: &dyn ScenePose) -> Option<(Vec3, Vec3)> {
        let mut result: Option<(Vec3, Vec3)> = None;
        self.visit_meshes(pose, &mut |mesh| {
            let (lo, hi) = mesh.shape.bounds();
            for i in 0..8 {
                let corner = Vec3::new(
                    if i & 1 == 0 { lo.x } else { hi.x },
                    if i & 2 == 0 { lo.y } else { hi.y },
                    if i & 4 == 0 { lo.z } else { hi.z },
                );
                let p = mat4::transform_point(mesh.world, corner);
                result = Some(match result {
                    Some((min, max)) => (min.min_components(p), max.max_components(p)),
                    None => (p, p),
                });
            }
        });
        result
    }

    /// Re-root the tree so its rest-pose bounding box is centered on the origin
    pub fn centered(self) -> Self {
        let Some((min, max)) = self.bounds(&RestPose) else {
            return self;
        };
        let center = (min + max) * 0.5;
        log::debug!("Centering scene: offset ({:.3}, {:.3}, {:.3})", -center.x, -center.y, -center.z);
        let root = SceneNode::group()
            .with_name("center")
            .at(-center.x, -center.y, -center.z)
            .with_child(self.root);
        Self { root }
    }
}
