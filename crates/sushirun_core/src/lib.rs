//! Core types for Sushi Run Club
//!
//! This crate holds all run state and everything that is computed from it,
//! with no windowing or GPU dependencies:
//!
//! - [`Treadmill`] - Speed and running state, owner of the [`SimulationClock`]
//! - [`ControlPanel`] - Floating panel placement, collapse and drag
//! - [`SceneGraph`] - Immutable tree of meshes built once at startup
//! - [`SceneAnimation`] - Belt scroll, prop bounce and LED color per frame
//! - [`Transform3D`] / [`Material`] - Node placement and surface properties
//!
//! Operations that depend on wall time take an explicit `Instant`.

mod transform;
mod material;
pub mod scene;
pub mod clock;
pub mod treadmill;
pub mod panel;
pub mod animation;
pub mod format;

pub use transform::Transform3D;
pub use material::{Material, hex_to_linear, srgb_to_linear};
pub use scene::{Binding, MeshNode, NodeKind, PosedMesh, RestPose, SceneGraph, SceneNode, ScenePose, ShapeRef};
pub use clock::{SimulationClock, Tick, MPH_TO_KMH};
pub use treadmill::{RunStatus, Treadmill, TreadmillSettings};
pub use panel::{ControlPanel, DragOutcome, PanelLayout};
pub use animation::{BeltAnimation, PropAnimation, SceneAnimation, led_material};
pub use format::{format_distance, format_elapsed, format_speed};

// Re-export commonly used types from sushirun_math for convenience
pub use sushirun_math::{Vec2, Vec3, Mat4, Shape3D, Cuboid, Cylinder, Sphere};
