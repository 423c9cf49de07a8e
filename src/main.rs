//! Sushi Run Club
//!
//! A treadmill running tracker: a 3D treadmill carrying three nigiri, a
//! draggable speed panel and a live distance tracker.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use sushirun::config::AppConfig;
use sushirun::input::{InputAction, InputMapper};
use sushirun::scene::SceneBuilder;
use sushirun::systems::{RenderError, RenderSystem, RunSession, SimulationSystem, WindowSystem};
use sushirun::ui::{FrameStats, UiView};
use sushirun_core::SceneGraph;
use sushirun_input::OrbitController;
use sushirun_math::{Vec2, Vec3};
use sushirun_render::{camera::OrbitCamera, RenderableGeometry};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    /// Treadmill and control panel
    session: RunSession,
    simulation: SimulationSystem,
    /// Static scene, posed every frame into `geometry`
    scene: SceneGraph,
    geometry: RenderableGeometry,
    camera: OrbitCamera,
    controller: OrbitController,
    /// Last pointer position in logical pixels
    cursor: Option<Vec2>,
    stats: FrameStats,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let now = Instant::now();
        let viewport = Vec2::new(config.window.width as f32, config.window.height as f32);
        let session = RunSession::new(&config, viewport, now);

        let scene = SceneBuilder::sushi_run();
        let geometry = RenderableGeometry::with_capacity(4096, 8192);

        let camera = OrbitCamera::looking_at(
            Vec3::from_array(config.camera.start_position),
            Vec3::from_array(config.camera.target),
        )
        .with_projection(config.camera.fov, config.camera.near, config.camera.far)
        .with_distance_limits(config.orbit.min_distance, config.orbit.max_distance)
        .with_polar_limits(config.orbit.min_polar_angle, config.orbit.max_polar_angle);

        // Configure controller from config
        let controller = OrbitController::new()
            .with_rotate_speed(config.orbit.rotate_speed)
            .with_zoom_speed(config.orbit.zoom_speed)
            .with_damping(config.orbit.damping_factor)
            .with_auto_rotate(config.orbit.auto_rotate, config.orbit.auto_rotate_speed);

        Self {
            config,
            window: None,
            render: None,
            session,
            simulation: SimulationSystem::new(now),
            scene,
            geometry,
            camera,
            controller,
            cursor: None,
            stats: FrameStats::default(),
        }
    }

    /// Apply an action from a key or an overlay widget
    fn dispatch(&mut self, action: InputAction, event_loop: &ActiveEventLoop, now: Instant) {
        if self.session.apply(action, now) {
            return;
        }
        match action {
            InputAction::ToggleAutoRotate => {
                let enabled = self.controller.toggle_auto_rotate();
                log::info!("Auto-rotate: {}", if enabled { "ON" } else { "OFF" });
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Exit => event_loop.exit(),
            _ => {}
        }
    }

    fn update_stats(&mut self, dt: f32) {
        if dt > 0.0 {
            // Exponential smoothing so the readout is legible
            let frame_ms = dt * 1000.0;
            self.stats.frame_ms = if self.stats.frame_ms == 0.0 {
                frame_ms
            } else {
                self.stats.frame_ms * 0.9 + frame_ms * 0.1
            };
            self.stats.fps = 1000.0 / self.stats.frame_ms;
        }
        self.stats.triangles = self.geometry.triangle_count();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let result = self.simulation.update(
            now,
            &mut self.session,
            &mut self.camera,
            &mut self.controller,
            &self.scene,
            &mut self.geometry,
        );
        if let Some(tick) = result.tick {
            let before = tick.distance_km - tick.delta_km;
            if tick.distance_km.floor() > before.floor() {
                log::info!("Passed {:.0} km", tick.distance_km.floor());
            }
        }
        self.update_stats(result.dt);

        let (Some(window), Some(render)) = (self.window.as_mut(), self.render.as_mut()) else {
            return;
        };
        window.update_title(self.session.treadmill.status());

        let view = UiView {
            session: &self.session,
            now,
            title: &self.config.window.title,
            auto_rotating: self.controller.is_auto_rotating(),
            stats: self.config.debug.show_frame_stats.then_some(self.stats),
        };
        let (frame, actions) = render.overlay().prepare(window.window(), &view);

        match render.render_frame(&self.camera, &self.geometry, &frame) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => render.recover_surface(),
            Err(RenderError::OutOfMemory) => {
                log::error!("{}", RenderError::OutOfMemory);
                event_loop.exit();
            }
            Err(e) => log::warn!("{}", e),
        }

        for action in actions {
            self.dispatch(action, event_loop, now);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            self.config.window.vsync,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        self.session.resize(window.logical_size());
        log::info!(
            "Scene ready: {} vertices, {} triangles",
            self.geometry.vertex_count(),
            self.geometry.triangle_count()
        );

        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let (Some(window), Some(render)) = (self.window.as_ref(), self.render.as_mut()) else {
            return;
        };
        let egui_consumed = render.overlay().handle_window_event(window.window(), &event);
        let ui_wants_pointer = egui_consumed || render.overlay().wants_pointer();
        let ui_wants_keyboard = render.overlay().wants_keyboard();
        let mut action = None;

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                render.resize(physical_size.width, physical_size.height);
                self.session.resize(window.logical_size());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                self.session.resize(window.logical_size());
            }

            WindowEvent::Focused(false) => {
                self.controller.release();
                self.session.cancel_drag();
            }

            WindowEvent::KeyboardInput { event, .. } if !ui_wants_keyboard => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    action = InputMapper::map_keyboard(key, event.state);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let p = window.to_logical(position.x, position.y);
                if self.session.panel.is_dragging() {
                    self.session.pointer_moved(p);
                } else if let Some(prev) = self.cursor {
                    self.controller.process_mouse_motion(
                        (p.x - prev.x) as f64,
                        (p.y - prev.y) as f64,
                        window.logical_size().y,
                    );
                }
                self.cursor = Some(p);
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }

            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed if button == MouseButton::Left => {
                    // The panel handle wins over both egui and the orbit controls
                    let grabbed = self.cursor.is_some_and(|p| self.session.pointer_pressed(p));
                    if !grabbed && !ui_wants_pointer {
                        self.controller.process_mouse_button(button, state);
                    }
                }
                ElementState::Pressed => {}
                ElementState::Released => {
                    if button == MouseButton::Left {
                        self.session.pointer_released();
                    }
                    self.controller.process_mouse_button(button, state);
                }
            },

            WindowEvent::MouseWheel { delta, .. } => {
                if !ui_wants_pointer {
                    self.controller.process_scroll(delta);
                }
            }

            WindowEvent::Touch(Touch { id, phase, location, .. }) => {
                let p = window.to_logical(location.x, location.y);
                match phase {
                    TouchPhase::Started => {
                        self.session.touch_started(id, p);
                    }
                    TouchPhase::Moved => self.session.touch_moved(id, p),
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        self.session.touch_ended(id);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }

        if let Some(action) = action {
            self.dispatch(action, event_loop, Instant::now());
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    // Config first so its log level can seed the logger; RUST_LOG still wins
    let loaded = AppConfig::load();
    let level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        AppConfig::default()
    });
    log::info!("Starting {}", config.window.title);

    // Create event loop
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
