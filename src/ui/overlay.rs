//! egui overlay composited over the scene
//!
//! The overlay renders in three phases so the scene pass and the egui pass can
//! share one encoder:
//!
//!   1. `prepare()` - run the widgets, tessellate, collect actions
//!   2. `upload()`  - update textures and buffers (borrows the encoder)
//!   3. `paint()`   - draw into a `LoadOp::Load` pass created with `forget_lifetime()`
//!
//! followed by `cleanup()` to free textures egui no longer references.

use winit::window::Window;
use crate::input::InputAction;
use super::widgets::{self, UiView};

/// Tessellated overlay output for one frame
pub struct UiFrame {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub screen_descriptor: egui_wgpu::ScreenDescriptor,
}

pub struct UiOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl UiOverlay {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, window: &Window) -> Self {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals::light());
        let state = egui_winit::State::new(
            ctx.clone(),
            ctx.viewport_id(),
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self { ctx, state, renderer }
    }

    /// Feed a window event to egui; true when egui consumed it
    pub fn handle_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Whether the pointer is over an overlay widget or egui is tracking a drag
    pub fn wants_pointer(&self) -> bool {
        self.ctx.is_pointer_over_area() || self.ctx.wants_pointer_input()
    }

    /// Whether a text field or slider has keyboard focus
    pub fn wants_keyboard(&self) -> bool {
        self.ctx.wants_keyboard_input()
    }

    /// Run the widgets for this frame
    pub fn prepare(&mut self, window: &Window, view: &UiView<'_>) -> (UiFrame, Vec<InputAction>) {
        let mut actions = Vec::new();
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| widgets::draw(ctx, view, &mut actions));

        self.state.handle_platform_output(window, full_output.platform_output);

        let primitives = self.ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let size = window.inner_size();
        let frame = UiFrame {
            primitives,
            textures_delta: full_output.textures_delta,
            screen_descriptor: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [size.width, size.height],
                pixels_per_point: full_output.pixels_per_point,
            },
        };
        (frame, actions)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &UiFrame,
    ) {
        for (id, image_delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &frame.primitives, &frame.screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(&self, render_pass: &mut wgpu::RenderPass<'static>, frame: &UiFrame) {
        self.renderer
            .render(render_pass, &frame.primitives, &frame.screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, frame: &UiFrame) {
        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
