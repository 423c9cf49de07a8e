//! 3D Mathematics Library
//!
//! This crate provides vector, matrix and primitive mesh types for Sushi Run Club.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Vec2`] - 2D vector for screen-space layout
//! - [`Mat4`] - column-major 4x4 matrix, plus helpers in [`mat4`]
//!
//! ## Shape Types
//!
//! - [`Shape3D`] - Trait for closed meshes with per-vertex normals
//! - [`Cuboid`] - Axis-aligned box
//! - [`Cylinder`] - Capped cylinder along Y
//! - [`Sphere`] - UV sphere

mod vec3;
pub mod mat4;
pub mod shape;
pub mod cuboid;
pub mod cylinder;
pub mod sphere;

pub use vec3::{Vec2, Vec3};
pub use mat4::Mat4;
pub use shape::{MeshVertex, Shape3D, Triangle};
pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use sphere::Sphere;
