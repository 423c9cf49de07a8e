//! Per-frame cosmetic animation
//!
//! Everything here advances only through `tick(dt, status)`. Paused frames
//! leave the accumulated phases untouched, but the pose is still evaluated
//! from the current speed so a paused prop rests at its last bounce height.

use std::f32::consts::{PI, TAU};
use sushirun_math::Vec3;
use crate::scene::{Binding, ScenePose};
use crate::treadmill::RunStatus;
use crate::{Material, Transform3D};

/// Belt scroll rate per mph
pub const BELT_RATE: f32 = 0.5;
/// Prop bounce phase rate per mph
pub const BOUNCE_RATE: f32 = 10.0;
/// Prop spin rate per mph
pub const SPIN_RATE: f32 = 5.0;
/// Bounce height per mph (in prop-local units before the prop's own scale)
pub const BOUNCE_HEIGHT: f32 = 0.05;
/// Roll amplitude per mph in radians
pub const ROLL_AMPLITUDE: f32 = 0.1;

/// Starting phases of the three props
pub const PROP_PHASES: [f32; 3] = [0.0, PI / 3.0, PI / 1.5];

/// Tread segments scrolling along Z
#[derive(Clone, Debug)]
pub struct BeltAnimation {
    positions: Vec<f32>,
    start: f32,
    length: f32,
}

impl BeltAnimation {
    /// Evenly spaced treads starting at `start`
    pub fn new(count: usize, start: f32, spacing: f32) -> Self {
        let positions = (0..count).map(|i| start + spacing * i as f32).collect();
        Self {
            positions,
            start,
            length: spacing * count as f32,
        }
    }

    /// The belt used by the treadmill model: 38 treads from z = -1.9
    pub fn treadmill() -> Self {
        Self::new(38, -1.9, 0.1)
    }

    /// Scroll every tread; treads past the far end reappear at the near end
    pub fn tick(&mut self, dt: f32, status: RunStatus) {
        if !status.running {
            return;
        }
        let end = self.end();
        let step = status.speed * dt * BELT_RATE;
        for z in &mut self.positions {
            *z += step;
            if *z > end {
                *z = self.start + (*z - self.start).rem_euclid(self.length);
            }
        }
    }

    /// Z position of tread `index` (None if out of range)
    pub fn position(&self, index: usize) -> Option<f32> {
        self.positions.get(index).copied()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Lowest allowed position
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Highest allowed position
    pub fn end(&self) -> f32 {
        self.start + self.length
    }
}

/// Bounce and spin of one decorative prop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropAnimation {
    pub bounce: f32,
    pub rotation: f32,
}

impl PropAnimation {
    /// Both phases start at `phase`
    pub fn new(phase: f32) -> Self {
        Self {
            bounce: phase,
            rotation: phase,
        }
    }

    /// Advance the phases, wrapped to `[0, 2pi)`
    pub fn tick(&mut self, dt: f32, status: RunStatus) {
        if !status.running {
            return;
        }
        self.bounce = (self.bounce + dt * BOUNCE_RATE * status.speed).rem_euclid(TAU);
        self.rotation = (self.rotation + dt * SPIN_RATE * status.speed).rem_euclid(TAU);
    }

    /// Vertical lift above the rest position
    pub fn lift(&self, speed: f32) -> f32 {
        (self.bounce.sin() * BOUNCE_HEIGHT * speed).abs()
    }

    /// Side-to-side roll about Z
    pub fn roll(&self, speed: f32) -> f32 {
        (self.bounce * 2.0).sin() * ROLL_AMPLITUDE * speed
    }

    /// Apply to a rest transform
    pub fn apply(&self, rest: &Transform3D, speed: f32) -> Transform3D {
        let mut t = *rest;
        t.position.y += self.lift(speed);
        t.rotation = Vec3::new(self.rotation, rest.rotation.y, self.roll(speed));
        t
    }
}

/// Console LED color for the run state
pub fn led_material(status: RunStatus) -> Material {
    let color = if !status.running {
        0x666666
    } else if status.speed > 2.0 {
        0xff3300
    } else if status.speed > 1.0 {
        0xffaa00
    } else {
        0x00aaff
    };
    let intensity = if status.running { 0.5 } else { 0.1 };
    Material::hex(color)
        .with_roughness(0.1)
        .with_emissive(color, intensity)
}

/// All animated scene state
#[derive(Clone, Debug)]
pub struct SceneAnimation {
    belt: BeltAnimation,
    props: Vec<PropAnimation>,
    status: RunStatus,
}

impl Default for SceneAnimation {
    fn default() -> Self {
        Self::new(BeltAnimation::treadmill(), &PROP_PHASES)
    }
}

impl SceneAnimation {
    pub fn new(belt: BeltAnimation, phases: &[f32]) -> Self {
        Self {
            belt,
            props: phases.iter().copied().map(PropAnimation::new).collect(),
            status: RunStatus::default(),
        }
    }

    /// Advance by `dt` seconds under the given run state
    pub fn tick(&mut self, dt: f32, status: RunStatus) {
        // Stalled frames are capped at a quarter second
        let dt = dt.clamp(0.0, 0.25);
        self.status = status;
        self.belt.tick(dt, status);
        for prop in &mut self.props {
            prop.tick(dt, status);
        }
    }

    pub fn belt(&self) -> &BeltAnimation {
        &self.belt
    }

    pub fn props(&self) -> &[PropAnimation] {
        &self.props
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }
}

impl ScenePose for SceneAnimation {
    fn transform(&self, binding: Binding, rest: &Transform3D) -> Transform3D {
        match binding {
            Binding::Tread(i) => match self.belt.position(i) {
                Some(z) => {
                    let mut t = *rest;
                    t.position.z = z;
                    t
                }
                None => *rest,
            },
            Binding::Prop(i) => match self.props.get(i) {
                Some(prop) => prop.apply(rest, self.status.speed),
                None => *rest,
            },
            Binding::Static | Binding::Led => *rest,
        }
    }

    fn material(&self, binding: Binding, authored: &Material) -> Material {
        match binding {
            Binding::Led => led_material(self.status),
            _ => *authored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNNING: RunStatus = RunStatus { speed: 2.0, running: true };
    const PAUSED: RunStatus = RunStatus { speed: 2.0, running: false };

    #[test]
    fn test_belt_layout() {
        let belt = BeltAnimation::treadmill();
        assert_eq!(belt.positions().len(), 38);
        assert!((belt.position(0).unwrap() + 1.9).abs() < 1e-6);
        assert!((belt.position(37).unwrap() - 1.8).abs() < 1e-5);
        assert!(belt.position(38).is_none());
    }

    #[test]
    fn test_belt_scrolls_with_speed() {
        let mut belt = BeltAnimation::treadmill();
        belt.tick(0.1, RUNNING);
        // 2 mph * 0.1 s * 0.5
        assert!((belt.position(0).unwrap() - (-1.8)).abs() < 1e-5);
    }

    #[test]
    fn test_belt_paused() {
        let mut belt = BeltAnimation::treadmill();
        let before = belt.positions().to_vec();
        belt.tick(1.0, PAUSED);
        assert_eq!(belt.positions(), &before[..]);
    }

    #[test]
    fn test_belt_wraps_within_bounds() {
        let mut belt = BeltAnimation::treadmill();
        for _ in 0..1000 {
            belt.tick(0.016, RunStatus { speed: 3.0, running: true });
            for &z in belt.positions() {
                assert!(z >= belt.start() - 1e-4 && z <= belt.end() + 1e-4, "tread at {}", z);
            }
        }
    }

    #[test]
    fn test_prop_phases_wrap() {
        let mut prop = PropAnimation::new(PROP_PHASES[2]);
        for _ in 0..500 {
            prop.tick(0.05, RunStatus { speed: 3.0, running: true });
            assert!((0.0..TAU).contains(&prop.bounce));
            assert!((0.0..TAU).contains(&prop.rotation));
        }
    }

    #[test]
    fn test_prop_paused_holds_phase() {
        let mut prop = PropAnimation::new(1.0);
        prop.tick(1.0, PAUSED);
        assert_eq!(prop, PropAnimation::new(1.0));
    }

    #[test]
    fn test_prop_advances() {
        let mut prop = PropAnimation::new(0.0);
        prop.tick(0.01, RunStatus { speed: 1.0, running: true });
        assert!((prop.bounce - 0.1).abs() < 1e-6);
        assert!((prop.rotation - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_prop_pose() {
        let prop = PropAnimation { bounce: PI / 2.0, rotation: 0.3 };
        let rest = Transform3D::from_position(Vec3::new(0.5, 0.4, -0.5));
        let t = prop.apply(&rest, 2.0);
        assert!((t.position.y - 0.5).abs() < 1e-6);
        assert_eq!(t.position.x, 0.5);
        assert_eq!(t.rotation.x, 0.3);
        assert!(t.rotation.z.abs() < 1e-6);
    }

    #[test]
    fn test_led_colors() {
        let paused = led_material(RunStatus { speed: 3.0, running: false });
        let slow = led_material(RunStatus { speed: 1.0, running: true });
        let medium = led_material(RunStatus { speed: 1.5, running: true });
        let fast = led_material(RunStatus { speed: 2.5, running: true });
        assert_eq!(paused.base_color, Material::hex(0x666666).base_color);
        assert_eq!(slow.base_color, Material::hex(0x00aaff).base_color);
        assert_eq!(medium.base_color, Material::hex(0xffaa00).base_color);
        assert_eq!(fast.base_color, Material::hex(0xff3300).base_color);
        assert!(paused.emissive[0] < fast.emissive[0]);
    }

    #[test]
    fn test_scene_pose_bindings() {
        let mut anim = SceneAnimation::default();
        anim.tick(0.1, RUNNING);
        let rest = Transform3D::from_position(Vec3::new(0.0, 0.18, -1.9));
        let tread = anim.transform(Binding::Tread(0), &rest);
        assert!((tread.position.z - (-1.8)).abs() < 1e-5);
        assert_eq!(tread.position.y, 0.18);
        assert_eq!(anim.transform(Binding::Tread(99), &rest), rest);
        assert_eq!(anim.transform(Binding::Static, &rest), rest);
    }

    #[test]
    fn test_large_dt_clamped() {
        let mut anim = SceneAnimation::default();
        anim.tick(10.0, RUNNING);
        let mut reference = SceneAnimation::default();
        reference.tick(0.25, RUNNING);
        assert_eq!(anim.belt().positions(), reference.belt().positions());
    }
}
