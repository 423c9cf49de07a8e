//! Orbit controller for turntable-style camera input
//!
//! Controls:
//! - Left mouse drag: orbit around the target
//! - Mouse wheel: zoom in/out
//! - Auto-rotate: continuous spin around the vertical axis
//!
//! Rotation is damped: drag input builds up a pending rotation that is applied
//! a little each frame and decays, independent of frame rate.

use std::f32::consts::TAU;
use sushirun_math::Vec3;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Reference frame rate the damping factor is tuned for
const DAMPING_REFERENCE_FPS: f32 = 60.0;
/// Pixels of trackpad scroll treated as one wheel line
const PIXELS_PER_LINE: f64 = 50.0;
/// Distance scale per wheel line at zoom speed 1
const ZOOM_BASE: f32 = 0.95;

/// Orbit controller
pub struct OrbitController {
    // Pointer state
    dragging: bool,

    // Rotation still to be applied (radians)
    pending_azimuth: f32,
    pending_polar: f32,

    // Zoom still to be applied (wheel lines, positive = zoom in)
    pending_zoom: f32,

    // Configuration
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub damping_enabled: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            dragging: false,

            pending_azimuth: 0.0,
            pending_polar: 0.0,

            pending_zoom: 0.0,

            rotate_speed: 0.5,
            zoom_speed: 0.5,
            damping_enabled: true,
            damping_factor: 0.1,
            auto_rotate: true,
            auto_rotate_speed: 1.5,  // 30s per turn at 2.0
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
        }
    }

    /// Process pointer movement in logical pixels
    ///
    /// `viewport_height` scales the drag so a full-height drag turns a full circle
    /// at rotate speed 1.
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64, viewport_height: f32) {
        if !self.dragging || viewport_height <= 0.0 {
            return;
        }
        let scale = TAU / viewport_height * self.rotate_speed;
        self.pending_azimuth -= delta_x as f32 * scale;
        self.pending_polar -= delta_y as f32 * scale;
    }

    /// Process a mouse wheel or trackpad scroll
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
        self.pending_zoom += lines;
    }

    /// Stop an in-progress drag (focus lost, pointer captured by UI)
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Apply accumulated input to the camera
    ///
    /// Returns the camera eye position for debug display.
    pub fn update<C: OrbitControl>(&mut self, camera: &mut C, dt: f32) -> Vec3 {
        let dt = dt.max(0.0);

        if self.auto_rotate {
            // Full turn every 60 / speed seconds
            self.pending_azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt;
        }

        let (azimuth, polar) = if self.damping_enabled {
            let keep = (1.0 - self.damping_factor.clamp(0.0, 1.0)).powf(dt * DAMPING_REFERENCE_FPS);
            let apply = 1.0 - keep;
            let step = (self.pending_azimuth * apply, self.pending_polar * apply);
            self.pending_azimuth *= keep;
            self.pending_polar *= keep;
            step
        } else {
            let step = (self.pending_azimuth, self.pending_polar);
            self.pending_azimuth = 0.0;
            self.pending_polar = 0.0;
            step
        };
        camera.rotate(azimuth, polar);

        if self.pending_zoom != 0.0 {
            let scale = ZOOM_BASE.powf(self.pending_zoom * self.zoom_speed);
            camera.dolly(scale);
            self.pending_zoom = 0.0;
        }

        camera.eye()
    }

    /// Check if the pointer is currently dragging the view
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Toggle auto-rotation on/off
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Check if auto-rotation is enabled
    pub fn is_auto_rotating(&self) -> bool {
        self.auto_rotate
    }

    /// Builder: set drag rotation speed
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set wheel zoom speed
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Builder: set damping factor (0 disables damping)
    pub fn with_damping(mut self, factor: f32) -> Self {
        self.damping_enabled = factor > 0.0;
        self.damping_factor = factor;
        self
    }

    /// Builder: enable or disable auto-rotation and set its speed
    pub fn with_auto_rotate(mut self, enabled: bool, speed: f32) -> Self {
        self.auto_rotate = enabled;
        self.auto_rotate_speed = speed;
        self
    }
}

/// Trait for orbit camera control
/// Allows the controller to work with different camera implementations
pub trait OrbitControl {
    /// Rotate around the target; the camera clamps the polar angle
    fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32);
    /// Multiply the orbit distance by `scale`; the camera clamps the result
    fn dolly(&mut self, scale: f32);
    fn eye(&self) -> Vec3;
}
