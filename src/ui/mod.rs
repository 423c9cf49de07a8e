//! On-screen overlay
//!
//! Header, distance tracker, control panel and rotation toggle, drawn with
//! egui on top of the 3D scene.

mod overlay;
mod widgets;

pub use overlay::{UiFrame, UiOverlay};
pub use widgets::{FrameStats, UiView};
