//! Treadmill run state
//!
//! [`Treadmill`] is the single owner of speed, the running flag and the
//! [`SimulationClock`]. Every mutation goes through an action method that
//! keeps speed inside `[0, max_speed]` and reanchors the clock whenever the
//! run goes from paused to running.

use std::time::{Duration, Instant};
use serde::{Serialize, Deserialize};
use crate::clock::{SimulationClock, Tick};

/// Tunable treadmill constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreadmillSettings {
    /// Upper speed limit in mph
    pub max_speed: f32,
    /// Increment used by the +/- buttons
    pub speed_step: f32,
    /// Quantization of the slider
    pub slider_step: f32,
    /// Decreasing to this speed or below pauses the run
    pub auto_pause_threshold: f32,
    /// Speed used when starting from 0
    pub resume_speed: f32,
    /// Speed at launch
    pub initial_speed: f32,
    /// Whether the run starts immediately
    pub start_running: bool,
    /// Distance accrual interval in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for TreadmillSettings {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            speed_step: 0.5,
            slider_step: 0.1,
            auto_pause_threshold: 0.5,
            resume_speed: 1.0,
            initial_speed: 1.0,
            start_running: true,
            tick_interval_ms: 1000,
        }
    }
}

impl TreadmillSettings {
    /// Replace nonsensical values with defaults, logging each fix
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            log::warn!("treadmill.max_speed must be positive and finite, using {}", defaults.max_speed);
            self.max_speed = defaults.max_speed;
        }
        if !(self.speed_step.is_finite() && self.speed_step > 0.0) {
            log::warn!("treadmill.speed_step must be positive and finite, using {}", defaults.speed_step);
            self.speed_step = defaults.speed_step;
        }
        if !(self.slider_step.is_finite() && self.slider_step > 0.0) {
            log::warn!("treadmill.slider_step must be positive and finite, using {}", defaults.slider_step);
            self.slider_step = defaults.slider_step;
        }
        if self.tick_interval_ms == 0 {
            log::warn!("treadmill.tick_interval_ms must be positive, using {}", defaults.tick_interval_ms);
            self.tick_interval_ms = defaults.tick_interval_ms;
        }
        if !(self.auto_pause_threshold.is_finite() && self.auto_pause_threshold >= 0.0) {
            log::warn!(
                "treadmill.auto_pause_threshold must be non-negative and finite, using {}",
                defaults.auto_pause_threshold
            );
            self.auto_pause_threshold = defaults.auto_pause_threshold;
        }
        if self.auto_pause_threshold >= self.max_speed {
            // Otherwise every decrease from max_speed would pause
            log::warn!("treadmill.auto_pause_threshold must be below max_speed, using 0");
            self.auto_pause_threshold = 0.0;
        }
        if !(self.resume_speed.is_finite() && self.resume_speed >= 0.0) {
            log::warn!("treadmill.resume_speed must be non-negative and finite, using {}", defaults.resume_speed);
            self.resume_speed = defaults.resume_speed;
        }
        if !self.initial_speed.is_finite() {
            log::warn!("treadmill.initial_speed must be finite, using {}", defaults.initial_speed);
            self.initial_speed = defaults.initial_speed;
        }
        self.initial_speed = self.initial_speed.clamp(0.0, self.max_speed);
        self.resume_speed = self.resume_speed.clamp(0.0, self.max_speed);
        self
    }

    /// Accrual interval as a Duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Snapshot of what the animation and UI need each frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStatus {
    pub speed: f32,
    pub running: bool,
}

/// Treadmill controller
#[derive(Clone, Debug)]
pub struct Treadmill {
    settings: TreadmillSettings,
    speed: f32,
    running: bool,
    clock: SimulationClock,
}

impl Treadmill {
    /// Create a treadmill whose run starts at `now`
    pub fn new(settings: TreadmillSettings, now: Instant) -> Self {
        let settings = settings.sanitized();
        let speed = settings.initial_speed;
        let running = settings.start_running && speed > 0.0;
        let clock = SimulationClock::new(settings.tick_interval(), now);
        Self { settings, speed, running, clock }
    }

    /// Step the speed up; resumes a paused run
    pub fn increase_speed(&mut self, now: Instant) {
        let next = (self.speed + self.settings.speed_step).min(self.settings.max_speed);
        self.speed = next;
        if !self.running && next > 0.0 {
            self.start(now);
        }
    }

    /// Step the speed down; pauses at or below the auto-pause threshold
    pub fn decrease_speed(&mut self, now: Instant) {
        let next = (self.speed - self.settings.speed_step).max(0.0);
        self.speed = next;
        if self.running && next <= self.settings.auto_pause_threshold {
            self.pause(now);
        }
    }

    /// Set the speed from the slider; running follows `speed > 0`
    pub fn set_speed(&mut self, value: f32, now: Instant) {
        let value = if value.is_finite() { value } else { 0.0 };
        let step = self.settings.slider_step;
        let quantized = (value.clamp(0.0, self.settings.max_speed) / step).round() * step;
        self.speed = quantized.clamp(0.0, self.settings.max_speed);

        match (self.running, self.speed > 0.0) {
            (false, true) => self.start(now),
            (true, false) => self.pause(now),
            _ => {}
        }
    }

    /// Start or pause the run
    pub fn toggle_running(&mut self, now: Instant) {
        if self.running {
            self.pause(now);
        } else {
            if self.speed <= 0.0 {
                self.speed = self.settings.resume_speed;
            }
            if self.speed > 0.0 {
                self.start(now);
            }
        }
    }

    /// Zero the distance and restart the elapsed timer
    pub fn reset(&mut self, now: Instant) {
        self.clock.reset(now);
        log::info!("Distance reset");
    }

    /// Poll the distance clock
    pub fn update(&mut self, now: Instant) -> Option<Tick> {
        self.clock.poll(now, self.speed, self.running)
    }

    fn start(&mut self, now: Instant) {
        self.running = true;
        self.clock.reanchor(now);
        log::info!("Run started at {:.1} mph", self.speed);
    }

    fn pause(&mut self, now: Instant) {
        self.running = false;
        self.clock.reanchor(now);
        log::info!("Run paused at {:.1} mph ({:.3} km)", self.speed, self.clock.distance_km());
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.clock.distance_km()
    }

    /// Time since the run started or was reset
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.clock.elapsed(now)
    }

    pub fn status(&self) -> RunStatus {
        RunStatus {
            speed: self.speed,
            running: self.running,
        }
    }

    /// Whether the increase action would change anything
    pub fn can_increase(&self) -> bool {
        self.speed < self.settings.max_speed
    }

    /// Whether the decrease action would change anything
    pub fn can_decrease(&self) -> bool {
        self.speed > 0.0
    }

    pub fn settings(&self) -> &TreadmillSettings {
        &self.settings
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn treadmill() -> (Treadmill, Instant) {
        let now = Instant::now();
        (Treadmill::new(TreadmillSettings::default(), now), now)
    }

    #[test]
    fn test_defaults() {
        let (t, _) = treadmill();
        assert_eq!(t.speed(), 1.0);
        assert!(t.is_running());
        assert_eq!(t.distance_km(), 0.0);
    }

    #[test]
    fn test_increase_clamps_at_max() {
        let (mut t, now) = treadmill();
        for _ in 0..10 {
            t.increase_speed(now);
        }
        assert_eq!(t.speed(), 3.0);
        assert!(!t.can_increase());
    }

    #[test]
    fn test_decrease_to_threshold_pauses() {
        let (mut t, now) = treadmill();
        t.decrease_speed(now);
        assert_eq!(t.speed(), 0.5);
        assert!(!t.is_running());
    }

    #[test]
    fn test_decrease_above_threshold_keeps_running() {
        let (mut t, now) = treadmill();
        t.increase_speed(now);
        t.decrease_speed(now);
        assert_eq!(t.speed(), 1.0);
        assert!(t.is_running());
    }

    #[test]
    fn test_decrease_clamps_at_zero() {
        let (mut t, now) = treadmill();
        for _ in 0..10 {
            t.decrease_speed(now);
        }
        assert_eq!(t.speed(), 0.0);
        assert!(!t.can_decrease());
    }

    #[test]
    fn test_increase_resumes() {
        let (mut t, now) = treadmill();
        t.decrease_speed(now);
        t.decrease_speed(now);
        assert!(!t.is_running());
        t.increase_speed(now);
        assert_eq!(t.speed(), 0.5);
        assert!(t.is_running());
    }

    #[test]
    fn test_slider_quantizes_and_clamps() {
        let (mut t, now) = treadmill();
        t.set_speed(1.234, now);
        assert!((t.speed() - 1.2).abs() < 1e-5);
        t.set_speed(7.0, now);
        assert!((t.speed() - 3.0).abs() < 1e-5);
        t.set_speed(-2.0, now);
        assert_eq!(t.speed(), 0.0);
        assert!(!t.is_running());
        t.set_speed(f32::NAN, now);
        assert_eq!(t.speed(), 0.0);
    }

    #[test]
    fn test_slider_starts_run() {
        let (mut t, now) = treadmill();
        t.set_speed(0.0, now);
        assert!(!t.is_running());
        t.set_speed(0.3, now);
        assert!(t.is_running());
    }

    #[test]
    fn test_toggle_from_zero_uses_resume_speed() {
        let (mut t, now) = treadmill();
        t.set_speed(0.0, now);
        t.toggle_running(now);
        assert_eq!(t.speed(), 1.0);
        assert!(t.is_running());
    }

    #[test]
    fn test_toggle_pause_keeps_distance() {
        let (mut t, now) = treadmill();
        t.update(now + Duration::from_secs(10));
        let distance = t.distance_km();
        t.toggle_running(now + Duration::from_secs(10));
        assert!(!t.is_running());
        assert_eq!(t.distance_km(), distance);
        assert_eq!(t.elapsed(now + Duration::from_secs(10)), Duration::from_secs(10));
    }

    #[test]
    fn test_sanitized_settings() {
        let settings = TreadmillSettings {
            max_speed: -1.0,
            speed_step: 0.0,
            initial_speed: 10.0,
            tick_interval_ms: 0,
            ..TreadmillSettings::default()
        }
        .sanitized();
        assert_eq!(settings.max_speed, 3.0);
        assert_eq!(settings.speed_step, 0.5);
        assert_eq!(settings.initial_speed, 3.0);
        assert_eq!(settings.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_sanitized_rejects_non_finite_limits() {
        let settings = TreadmillSettings {
            max_speed: f32::INFINITY,
            slider_step: f32::INFINITY,
            auto_pause_threshold: f32::NAN,
            resume_speed: f32::NAN,
            initial_speed: f32::NAN,
            ..TreadmillSettings::default()
        }
        .sanitized();
        assert_eq!(settings, TreadmillSettings::default());
    }

    #[test]
    fn test_sanitized_threshold_range() {
        let settings = TreadmillSettings {
            auto_pause_threshold: -1.0,
            resume_speed: -2.0,
            ..TreadmillSettings::default()
        }
        .sanitized();
        assert_eq!(settings.auto_pause_threshold, 0.5);
        assert_eq!(settings.resume_speed, 1.0);

        let settings = TreadmillSettings {
            auto_pause_threshold: 3.0,
            ..TreadmillSettings::default()
        }
        .sanitized();
        assert_eq!(settings.auto_pause_threshold, 0.0);
    }

    #[test]
    fn test_negative_threshold_still_pauses_at_zero() {
        let settings = TreadmillSettings {
            auto_pause_threshold: -1.0,
            ..TreadmillSettings::default()
        };
        let now = Instant::now();
        let mut t = Treadmill::new(settings, now);
        t.decrease_speed(now);
        t.decrease_speed(now);
        assert_eq!(t.speed(), 0.0);
        assert!(!t.is_running());
    }

    #[test]
    fn test_nan_resume_speed_toggles_to_default() {
        let settings = TreadmillSettings {
            resume_speed: f32::NAN,
            initial_speed: 0.0,
            ..TreadmillSettings::default()
        };
        let now = Instant::now();
        let mut t = Treadmill::new(settings, now);
        t.toggle_running(now);
        assert_eq!(t.speed(), 1.0);
        assert!(t.is_running());
    }

    #[test]
    fn test_infinite_max_speed_still_caps() {
        let settings = TreadmillSettings {
            max_speed: f32::INFINITY,
            ..TreadmillSettings::default()
        };
        let now = Instant::now();
        let mut t = Treadmill::new(settings, now);
        for _ in 0..20 {
            t.increase_speed(now);
        }
        assert_eq!(t.speed(), 3.0);
        assert!(!t.can_increase());
    }

    #[test]
    fn test_not_running_when_initial_speed_zero() {
        let settings = TreadmillSettings {
            initial_speed: 0.0,
            ..TreadmillSettings::default()
        };
        let t = Treadmill::new(settings, Instant::now());
        assert!(!t.is_running());
    }
}
