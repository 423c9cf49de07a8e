//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod render;
mod session;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use session::RunSession;
pub use simulation::{SimulationResult, SimulationSystem};
pub use window::{format_title, WindowError, WindowSystem};
