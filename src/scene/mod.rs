//! Scene construction utilities
//!
//! This module builds the treadmill and the nigiri riding on it.

mod scene_builder;

pub use scene_builder::{Nigiri, SceneBuilder};
