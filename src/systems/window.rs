//! Window management system
//!
//! Handles window creation, fullscreen toggle, logical size, and title updates.

use std::sync::Arc;
use sushirun_core::RunStatus;
use sushirun_math::Vec2;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
    last_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );
        log::info!("Created window {}x{}", config.width, config.height);

        Ok(Self {
            window,
            base_title: config.title.clone(),
            last_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Client area in logical pixels
    pub fn logical_size(&self) -> Vec2 {
        let size = self.window.inner_size().to_logical::<f32>(self.window.scale_factor());
        Vec2::new(size.width, size.height)
    }

    /// Convert a physical position to logical pixels
    pub fn to_logical(&self, x: f64, y: f64) -> Vec2 {
        let scale = self.window.scale_factor();
        Vec2::new((x / scale) as f32, (y / scale) as f32)
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Update window title with run state, only when it changes
    pub fn update_title(&mut self, status: RunStatus) {
        let title = format_title(&self.base_title, status);
        if title != self.last_title {
            self.window.set_title(&title);
            self.last_title = title;
        }
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Window title for a run state, e.g. `"Sushi Run Club - 1.5 mph"`
pub fn format_title(base: &str, status: RunStatus) -> String {
    if status.running {
        format!("{} - {:.1} mph", base, status.speed)
    } else {
        format!("{} - paused", base)
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_formatting_running() {
        let title = format_title("Test", RunStatus { speed: 2.5, running: true });
        assert_eq!(title, "Test - 2.5 mph");
    }

    #[test]
    fn test_title_formatting_paused() {
        let title = format_title("Test", RunStatus { speed: 2.5, running: false });
        assert_eq!(title, "Test - paused");
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
