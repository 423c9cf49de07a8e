//! Frame simulation system
//!
//! Manages the per-frame update including:
//! - Delta time calculation
//! - Distance accrual (polled once per tick interval)
//! - Belt and prop animation
//! - Camera orbit
//! - Rebuilding the posed geometry

use std::time::Instant;
use sushirun_core::{SceneAnimation, SceneGraph, Tick};
use sushirun_input::OrbitController;
use sushirun_render::{camera::OrbitCamera, RenderableGeometry};
use super::RunSession;

/// Longest frame the animation will integrate in one step
const MAX_FRAME_DT: f32 = 0.25;

/// Result of a simulation update
pub struct SimulationResult {
    /// Capped frame time in seconds
    pub dt: f32,
    /// Distance accrued this frame, if a tick fired
    pub tick: Option<Tick>,
}

/// Manages the frame loop
pub struct SimulationSystem {
    last_frame: Instant,
    animation: SceneAnimation,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(now: Instant) -> Self {
        Self {
            last_frame: now,
            animation: SceneAnimation::default(),
        }
    }

    /// Run one frame
    ///
    /// # Arguments
    /// * `now` - Frame timestamp
    /// * `session` - Treadmill to poll for distance
    /// * `camera` - Orbit camera to move
    /// * `controller` - Pending orbit input
    /// * `scene` - Static scene to pose
    /// * `geometry` - Output buffer, rebuilt in place
    pub fn update(
        &mut self,
        now: Instant,
        session: &mut RunSession,
        camera: &mut OrbitCamera,
        controller: &mut OrbitController,
        scene: &SceneGraph,
        geometry: &mut RenderableGeometry,
    ) -> SimulationResult {
        // 1. Calculate delta time
        let raw_dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        let dt = raw_dt.min(MAX_FRAME_DT);
        self.last_frame = now;

        // 2. Poll the distance clock
        let tick = session.treadmill.update(now);

        // 3. Advance belt and props under the current run state
        self.animation.tick(dt, session.treadmill.status());

        // 4. Orbit the camera
        controller.update(camera, dt);

        // 5. Flatten the posed scene
        geometry.rebuild(scene, &self.animation);

        SimulationResult { dt, tick }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::config::AppConfig;
    use crate::scene::SceneBuilder;
    use sushirun_math::Vec2;

    struct Fixture {
        sim: SimulationSystem,
        session: RunSession,
        camera: OrbitCamera,
        controller: OrbitController,
        scene: SceneGraph,
        geometry: RenderableGeometry,
        start: Instant,
    }

    impl Fixture {
        fn new() -> Self {
            let start = Instant::now();
            Self {
                sim: SimulationSystem::new(start),
                session: RunSession::new(&AppConfig::default(), Vec2::new(800.0, 600.0), start),
                camera: OrbitCamera::default(),
                controller: OrbitController::new().with_auto_rotate(false, 0.0),
                scene: SceneBuilder::sushi_run(),
                geometry: RenderableGeometry::new(),
                start,
            }
        }

        fn step(&mut self, at: Duration) -> SimulationResult {
            self.sim.update(
                self.start + at,
                &mut self.session,
                &mut self.camera,
                &mut self.controller,
                &self.scene,
                &mut self.geometry,
            )
        }
    }

    #[test]
    fn test_delta_time_capped() {
        let mut f = Fixture::new();
        let result = f.step(Duration::from_secs(2));
        assert_eq!(result.dt, MAX_FRAME_DT);
    }

    #[test]
    fn test_tick_fires_after_interval() {
        let mut f = Fixture::new();
        assert!(f.step(Duration::from_millis(500)).tick.is_none());
        let tick = f.step(Duration::from_millis(1000)).tick.unwrap();
        // 1 mph for one second
        assert!((tick.delta_km - 1.60934 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_geometry_rebuilt_each_frame() {
        let mut f = Fixture::new();
        f.step(Duration::from_millis(16));
        let first = f.geometry.vertices.clone();
        f.step(Duration::from_millis(32));
        assert_eq!(first.len(), f.geometry.vertex_count());
        // Treads moved while running
        assert_ne!(first, f.geometry.vertices);
    }

    #[test]
    fn test_paused_frame_keeps_pose() {
        let mut f = Fixture::new();
        let now = f.start;
        f.session.treadmill.toggle_running(now);
        f.step(Duration::from_millis(16));
        let first = f.geometry.vertices.clone();
        f.step(Duration::from_millis(32));
        assert_eq!(first, f.geometry.vertices);
    }
}
