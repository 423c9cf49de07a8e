//! Orbit camera
//!
//! The camera sits on a sphere around a target point. Azimuth is measured
//! around +Y from the +Z axis, polar angle from +Y down. Both the orbit
//! distance and the polar angle are clamped so the view can never flip over
//! the top or pass under the floor.

use std::f32::consts::PI;
use sushirun_input::OrbitControl;
use sushirun_math::{mat4, Mat4, Vec3};

/// Camera orbiting a fixed target
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    distance: f32,
    azimuth: f32,
    polar: f32,

    min_distance: f32,
    max_distance: f32,
    min_polar: f32,
    max_polar: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_at(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, 0.3, 0.0))
    }
}

impl OrbitCamera {
    /// Place the camera at `eye` looking at `target`, with unrestricted limits
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(f32::EPSILON);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        Self {
            target,
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
            distance,
            azimuth,
            polar,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar: 0.0,
            max_polar: PI,
        }
    }

    /// Builder: set the projection
    pub fn with_projection(mut self, fov_degrees: f32, near: f32, far: f32) -> Self {
        self.fov = fov_degrees;
        self.near = near;
        self.far = far;
        self
    }

    /// Builder: restrict the orbit distance
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min.max(0.0);
        self.max_distance = max.max(self.min_distance);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self
    }

    /// Builder: restrict the polar angle (radians from straight up)
    pub fn with_polar_limits(mut self, min: f32, max: f32) -> Self {
        self.min_polar = min.clamp(0.0, PI);
        self.max_polar = max.clamp(self.min_polar, PI);
        self.polar = self.polar.clamp(self.min_polar, self.max_polar);
        self
    }

    /// World-space camera position
    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.eye(), self.target, Vec3::Y)
    }

    /// View-to-clip matrix for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), aspect.max(f32::EPSILON), self.near, self.far)
    }

    /// Combined world-to-clip matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        mat4::mul(self.projection_matrix(aspect), self.view_matrix())
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    #[inline]
    pub fn polar(&self) -> f32 {
        self.polar
    }
}

impl OrbitControl for OrbitCamera {
    fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(std::f32::consts::TAU);
        self.polar = (self.polar + delta_polar).clamp(self.min_polar, self.max_polar);
    }

    fn dolly(&mut self, scale: f32) {
        if scale > 0.0 {
            self.distance = (self.distance * scale).clamp(self.min_distance, self.max_distance);
        }
    }

    fn eye(&self) -> Vec3 {
        OrbitCamera::eye(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn configured() -> OrbitCamera {
        OrbitCamera::default()
            .with_distance_limits(2.0, 10.0)
            .with_polar_limits(PI / 4.0, PI / 1.5)
    }

    #[test]
    fn test_looking_at_round_trip() {
        let eye = Vec3::new(0.0, 2.0, 5.0);
        let camera = OrbitCamera::looking_at(eye, Vec3::new(0.0, 0.3, 0.0));
        assert!(vec_approx_eq(camera.eye(), eye), "eye {:?}", camera.eye());
    }

    #[test]
    fn test_polar_clamped() {
        let mut camera = configured();
        camera.rotate(0.0, -10.0);
        assert!((camera.polar() - PI / 4.0).abs() < EPSILON);
        camera.rotate(0.0, 10.0);
        assert!((camera.polar() - PI / 1.5).abs() < EPSILON);
    }

    #[test]
    fn test_distance_clamped() {
        let mut camera = configured();
        camera.dolly(100.0);
        assert_eq!(camera.distance(), 10.0);
        camera.dolly(0.001);
        assert_eq!(camera.distance(), 2.0);
        camera.dolly(-1.0);
        assert_eq!(camera.distance(), 2.0);
    }

    #[test]
    fn test_azimuth_keeps_height() {
        let mut camera = configured();
        let before = camera.eye();
        camera.rotate(PI / 2.0, 0.0);
        let after = camera.eye();
        assert!((before.y - after.y).abs() < EPSILON);
        assert!(after.x > 0.0);
        assert!(after.z.abs() < EPSILON);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = configured();
        let clip = mat4::transform_point(camera.view_projection(16.0 / 9.0), camera.target);
        // Point transform ignores w, so check the direction only
        assert!(clip.x.abs() < EPSILON);
        assert!(clip.y.abs() < EPSILON);
    }
}
