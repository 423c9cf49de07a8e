//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the treadmill scene. Every prop added
//! through the builder rides on the treadmill deck and gets its own
//! [`Binding::Prop`] index in insertion order.

use std::f32::consts::PI;
use std::sync::Arc;

use sushirun_core::{Binding, Material, SceneGraph, SceneNode, ShapeRef};
use sushirun_math::{Cuboid, Cylinder, Shape3D, Sphere};

/// Number of tread segments on the belt
pub const TREAD_COUNT: usize = 38;

/// Nigiri varieties
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nigiri {
    Salmon,
    Tuna,
    Tamago,
}

impl Nigiri {
    fn name(self) -> &'static str {
        match self {
            Nigiri::Salmon => "salmon",
            Nigiri::Tuna => "tuna",
            Nigiri::Tamago => "tamago",
        }
    }
}

/// Builder for the treadmill scene
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new()
///     .add_treadmill()
///     .add_nigiri(Nigiri::Salmon, [-0.5, 0.4, 0.5])
///     .build();
/// ```
pub struct SceneBuilder {
    deck: SceneNode,
    prop_count: usize,
}

impl SceneBuilder {
    /// Create a new builder with an empty deck group (y = -0.5, scale 0.8)
    pub fn new() -> Self {
        Self {
            deck: SceneNode::group().with_name("treadmill").at(0.0, -0.5, 0.0).scaled(0.8),
            prop_count: 0,
        }
    }

    /// The full scene: treadmill with salmon, tuna and tamago on the belt,
    /// centered on the origin
    pub fn sushi_run() -> SceneGraph {
        Self::new()
            .add_treadmill()
            .add_nigiri(Nigiri::Salmon, [-0.5, 0.4, 0.5])
            .add_nigiri(Nigiri::Tuna, [0.0, 0.4, 0.0])
            .add_nigiri(Nigiri::Tamago, [0.5, 0.4, -0.5])
            .build()
            .centered()
    }

    /// Add the treadmill frame, belt, treads, console and feet
    pub fn add_treadmill(mut self) -> Self {
        let frame = Material::hex(0x222222).with_roughness(0.3).with_metalness(0.7);
        let console = Material::hex(0x333333).with_roughness(0.3).with_metalness(0.7);

        self.deck = self
            .deck
            .with_child(mesh(Cuboid::new(2.0, 0.1, 4.0), frame).with_name("base").at(0.0, 0.1, 0.0))
            .with_child(
                mesh(
                    Cuboid::new(2.1, 0.02, 4.1),
                    Material::hex(0x333333).with_roughness(0.3).with_metalness(0.8),
                )
                .with_name("trim")
                .at(0.0, 0.05, 0.0),
            )
            .with_child(
                mesh(Cuboid::new(1.8, 0.03, 3.8), Material::hex(0x111111).with_roughness(0.7))
                    .with_name("belt")
                    .at(0.0, 0.16, 0.0),
            );

        // Treads share one mesh; their Z comes from the belt animation
        let tread: Arc<dyn Shape3D> = Arc::new(Cuboid::new(1.75, 0.01, 0.05));
        let tread_material = Material::hex(0x333333).with_roughness(0.3);
        let treads = (0..TREAD_COUNT).map(|i| {
            SceneNode::mesh(ShapeRef::Shared(Arc::clone(&tread)), tread_material)
                .at(0.0, 0.18, -1.9 + 0.1 * i as f32)
                .with_binding(Binding::Tread(i))
        });
        self.deck = self.deck.with_child(SceneNode::group().with_name("treads").with_children(treads));

        let roller: Arc<dyn Shape3D> = Arc::new(Cylinder::new(0.08, 1.8, 16));
        let roller_material = Material::hex(0x444444).with_roughness(0.3).with_metalness(0.5);
        for z in [-1.9, 1.9] {
            self.deck = self.deck.with_child(
                SceneNode::mesh(ShapeRef::Shared(Arc::clone(&roller)), roller_material)
                    .with_name("roller")
                    .at(0.0, 0.16, z)
                    .rotated(0.0, 0.0, PI / 2.0),
            );
        }

        let rail: Arc<dyn Shape3D> = Arc::new(Cuboid::new(0.05, 0.1, 4.0));
        for x in [-0.95, 0.95] {
            self.deck = self.deck.with_child(
                SceneNode::mesh(ShapeRef::Shared(Arc::clone(&rail)), frame)
                    .with_name("rail")
                    .at(x, 0.2, 0.0),
            );
        }

        // Console, display and LED all lean back by the same angle
        let tilt = PI / 12.0;
        self.deck = self
            .deck
            .with_child(
                mesh(Cuboid::new(0.8, 0.1, 0.2), console)
                    .with_name("console")
                    .at(0.0, 0.25, -1.95)
                    .rotated(tilt, 0.0, 0.0),
            )
            .with_child(
                mesh(
                    Cuboid::new(0.6, 0.06, 0.01),
                    Material::hex(0x1a1a2e).with_roughness(0.1).with_emissive(0x1a1a2e, 0.2),
                )
                .with_name("display")
                .at(0.0, 0.27, -1.95)
                .rotated(tilt, 0.0, 0.0),
            )
            .with_child(
                mesh(Cuboid::new(0.4, 0.03, 0.005), Material::hex(0x666666).with_roughness(0.1))
                    .with_name("led")
                    .at(0.0, 0.27, -1.945)
                    .rotated(tilt, 0.0, 0.0)
                    .with_binding(Binding::Led),
            );

        let foot: Arc<dyn Shape3D> = Arc::new(Cylinder::new(0.05, 0.02, 16));
        let rubber = Material::hex(0x111111).with_roughness(0.9);
        for (x, z) in [(-0.8, -1.8), (0.8, -1.8), (-0.8, 1.8), (0.8, 1.8)] {
            self.deck = self.deck.with_child(
                SceneNode::mesh(ShapeRef::Shared(Arc::clone(&foot)), rubber)
                    .with_name("foot")
                    .at(x, 0.03, z),
            );
        }

        self
    }

    /// Add one nigiri on the deck at `position` (deck-local), bound to the next prop index
    pub fn add_nigiri(mut self, kind: Nigiri, position: [f32; 3]) -> Self {
        let index = self.prop_count;
        self.prop_count += 1;

        let rice = Material::hex(0xf8f8f0).with_roughness(0.8);
        let mut group = SceneNode::group()
            .with_name(kind.name())
            .at(position[0], position[1], position[2])
            .scaled(0.2)
            .with_binding(Binding::Prop(index))
            .with_child(mesh(Cuboid::new(0.8, 0.3, 0.5), rice).with_name("rice"))
            .with_child(mesh(Cuboid::new(0.78, 0.05, 0.48), rice).at(0.0, 0.15, 0.0));

        group = match kind {
            Nigiri::Salmon => fish_topping(group, 0xff9470, 0xff8060),
            Nigiri::Tuna => fish_topping(group, 0xcc3333, 0xaa2222),
            Nigiri::Tamago => tamago_topping(group),
        };

        self.deck = self.deck.with_child(group);
        self
    }

    /// Finish the scene
    pub fn build(self) -> SceneGraph {
        let graph = SceneGraph::new(self.deck);
        log::info!(
            "Built scene: {} meshes, {} props",
            graph.mesh_count(),
            self.prop_count
        );
        graph
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn mesh<S: Shape3D + 'static>(shape: S, material: Material) -> SceneNode {
    SceneNode::mesh(ShapeRef::owned(shape), material)
}

/// Fish slab with squared-off edges, grain lines and a dab of wasabi
fn fish_topping(group: SceneNode, color: u32, grain: u32) -> SceneNode {
    let flesh = Material::hex(color).with_roughness(0.6);
    let lines = (0..3).map(|i| {
        mesh(Cuboid::new(0.84, 0.01, 0.01), Material::hex(grain).with_roughness(0.6))
            .at(0.0, 0.25, -0.1 + 0.1 * i as f32)
    });
    group
        .with_child(mesh(Cuboid::new(0.85, 0.08, 0.55), flesh).with_name("topping").at(0.0, 0.2, 0.0))
        .with_child(mesh(Cuboid::new(0.85, 0.08, 0.02), flesh).at(0.0, 0.2, 0.27))
        .with_child(mesh(Cuboid::new(0.85, 0.08, 0.02), flesh).at(0.0, 0.2, -0.27))
        .with_children(lines)
        .with_child(
            mesh(Sphere::new(0.05, 16, 16), Material::hex(0x7fbc3b).with_roughness(0.7))
                .with_name("wasabi")
                .at(0.0, 0.16, 0.0),
        )
}

/// Taller omelette block with layer lines, tied with a nori strip
fn tamago_topping(group: SceneNode) -> SceneNode {
    let egg = Material::hex(0xffcc44).with_roughness(0.5);
    let layers = (0..2).map(|i| {
        mesh(Cuboid::new(0.86, 0.01, 0.56), Material::hex(0xffbb22).with_roughness(0.5))
            .at(0.0, 0.22 + 0.05 * i as f32, 0.0)
    });
    group
        .with_child(mesh(Cuboid::new(0.85, 0.12, 0.55), egg).with_name("topping").at(0.0, 0.22, 0.0))
        .with_child(mesh(Cuboid::new(0.85, 0.12, 0.02), egg).at(0.0, 0.22, 0.27))
        .with_child(mesh(Cuboid::new(0.85, 0.12, 0.02), egg).at(0.0, 0.22, -0.27))
        .with_children(layers)
        .with_child(
            mesh(Cuboid::new(0.86, 0.02, 0.56), Material::hex(0x223322).with_roughness(0.7))
                .with_name("nori")
                .at(0.0, 0.16, 0.0),
        )
}
