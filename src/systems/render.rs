//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene pipeline and the egui overlay
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use sushirun_core::hex_to_linear;
use sushirun_render::{
    camera::OrbitCamera,
    context::{ContextError, RenderContext},
    pipeline::{SceneUniforms, ScenePipeline},
    RenderableGeometry,
};
use crate::config::RenderingConfig;
use crate::ui::{UiFrame, UiOverlay};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Init(ContextError),
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Init(e) => write!(f, "GPU initialization failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Init(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Init(e)
    }
}

/// Background color as a linear wgpu clear value
fn clear_color(hex: u32) -> wgpu::Color {
    let [r, g, b] = hex_to_linear(hex);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

/// Unit vector from the origin towards the light
fn light_direction(position: [f32; 3]) -> [f32; 3] {
    let len = position.iter().map(|c| c * c).sum::<f32>().sqrt();
    if len <= f32::EPSILON {
        return [0.0, 1.0, 0.0];
    }
    position.map(|c| c / len)
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ScenePipeline,
    overlay: UiOverlay,
    render_config: RenderingConfig,
    clear: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window.clone(), vsync))?;

        let pipeline = ScenePipeline::new(
            &context.device,
            context.config.format,
            context.size.width,
            context.size.height,
        );
        let overlay = UiOverlay::new(&context.device, context.config.format, &window);

        Ok(Self {
            context,
            pipeline,
            overlay,
            clear: clear_color(render_config.clear_color),
            render_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(&self.context.device, width, height);
    }

    /// Reconfigure after `RenderError::SurfaceLost`
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// The egui overlay (for event routing and per-frame preparation)
    pub fn overlay(&mut self) -> &mut UiOverlay {
        &mut self.overlay
    }

    /// Render a single frame: the scene, then the overlay on top
    pub fn render_frame(
        &mut self,
        camera: &OrbitCamera,
        geometry: &RenderableGeometry,
        ui: &UiFrame,
    ) -> Result<(), RenderError> {
        if !self.context.is_drawable() {
            return Ok(());
        }

        let uniforms = SceneUniforms {
            view_proj: camera.view_projection(self.context.aspect_ratio()),
            camera_pos: camera.eye().to_array(),
            ambient_strength: self.render_config.ambient_strength,
            light_dir: light_direction(self.render_config.light_position),
            diffuse_strength: self.render_config.diffuse_strength,
            specular_strength: self.render_config.specular_strength,
            _padding: [0.0; 3],
        };
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);
        self.pipeline
            .upload_geometry(&self.context.device, &self.context.queue, geometry);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline.render(&mut encoder, &view, self.clear);

        self.overlay
            .upload(&self.context.device, &self.context.queue, &mut encoder, ui);
        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.overlay.paint(&mut egui_pass, ui);
        }
        self.overlay.cleanup(ui);

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
