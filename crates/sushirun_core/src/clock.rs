//! Simulated distance accrual
//!
//! The clock is polled every frame but only ticks once per interval. A tick
//! converts the current speed to km/h and adds the distance covered since the
//! previous tick. While paused, ticks only move the anchor forward, so time
//! spent paused never turns into distance later.

use std::time::{Duration, Instant};

/// Miles to kilometres
pub const MPH_TO_KMH: f64 = 1.60934;

/// Report of one distance tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Wall time covered by this tick
    pub elapsed: Duration,
    /// Distance added by this tick
    pub delta_km: f64,
    /// Total distance after this tick
    pub distance_km: f64,
}

/// Tracks run time and accumulated distance
#[derive(Clone, Debug)]
pub struct SimulationClock {
    interval: Duration,
    start_time: Instant,
    last_tick: Instant,
    last_poll: Instant,
    distance_km: f64,
}

impl SimulationClock {
    /// Create a clock anchored at `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            start_time: now,
            last_tick: now,
            last_poll: now,
            distance_km: 0.0,
        }
    }

    /// Distance for `speed_mph` held over `elapsed`
    pub fn distance_for(speed_mph: f32, elapsed: Duration) -> f64 {
        f64::from(speed_mph) * MPH_TO_KMH * elapsed.as_secs_f64() / 3600.0
    }

    /// Check the clock; returns a tick report when an interval has passed while running
    pub fn poll(&mut self, now: Instant, speed_mph: f32, running: bool) -> Option<Tick> {
        if now.saturating_duration_since(self.last_poll) < self.interval {
            return None;
        }
        self.last_poll = now;

        if !running {
            self.last_tick = now;
            return None;
        }

        let elapsed = now.saturating_duration_since(self.last_tick);
        let delta_km = Self::distance_for(speed_mph.max(0.0), elapsed);
        self.distance_km += delta_km;
        self.last_tick = now;

        log::debug!(
            "Tick: {:.3}s at {:.1} mph, +{:.6} km (total {:.4} km)",
            elapsed.as_secs_f64(),
            speed_mph,
            delta_km,
            self.distance_km
        );

        Some(Tick {
            elapsed,
            delta_km,
            distance_km: self.distance_km,
        })
    }

    /// Move the tick anchor to `now` without accruing
    pub fn reanchor(&mut self, now: Instant) {
        self.last_tick = now;
    }

    /// Zero the distance and restart time measurement at `now`
    pub fn reset(&mut self, now: Instant) {
        self.distance_km = 0.0;
        self.start_time = now;
        self.last_tick = now;
        self.last_poll = now;
    }

    /// Time since the run started (or was last reset)
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }

    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    #[inline]
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
