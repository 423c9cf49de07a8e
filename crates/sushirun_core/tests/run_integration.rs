//! Integration tests for the run model
//!
//! These tests drive the treadmill, clock and panel through simulated wall time:
//! 1. Distance accrues at speed * 1.60934 / 3600 km per second while running
//! 2. Pauses never accrue and never leave a backlog
//! 3. Speed stays in range under any action sequence
//! 4. Panel position stays inside the viewport under drags and resizes

use std::time::{Duration, Instant};
use sushirun_core::{
    ControlPanel, DragOutcome, PanelLayout, SceneAnimation, Treadmill, TreadmillSettings, Vec2,
    MPH_TO_KMH,
};

const EPSILON: f64 = 1e-9;

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

/// Poll the treadmill once per simulated second, like the redraw loop does
fn run_for(treadmill: &mut Treadmill, start: Instant, seconds: u64) -> Instant {
    for s in 1..=seconds {
        treadmill.update(start + secs(s));
    }
    start + secs(seconds)
}

// ==================== Distance Accrual Tests ====================

#[test]
fn test_one_hour_at_one_mph() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    run_for(&mut treadmill, t0, 3600);
    assert!(
        (treadmill.distance_km() - 1.60934).abs() < 1e-6,
        "distance was {}",
        treadmill.distance_km()
    );
}

#[test]
fn test_accrual_matches_formula_for_all_speeds() {
    let t0 = Instant::now();
    for tenths in 0..=30 {
        let speed = tenths as f32 / 10.0;
        let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
        treadmill.set_speed(speed, t0);
        if treadmill.speed() > 0.0 && !treadmill.is_running() {
            treadmill.toggle_running(t0);
        }
        run_for(&mut treadmill, t0, 120);
        let expected = f64::from(treadmill.speed()) * MPH_TO_KMH * 120.0 / 3600.0;
        assert!(
            (treadmill.distance_km() - expected).abs() < EPSILON,
            "speed {} accrued {} instead of {}",
            speed,
            treadmill.distance_km(),
            expected
        );
    }
}

#[test]
fn test_single_late_poll_covers_gap() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    treadmill.update(t0 + secs(3600));
    assert!((treadmill.distance_km() - 1.60934).abs() < EPSILON);
}

// ==================== Pause Tests ====================

#[test]
fn test_pause_accrues_nothing() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    let t1 = run_for(&mut treadmill, t0, 60);
    let before = treadmill.distance_km();

    treadmill.toggle_running(t1);
    run_for(&mut treadmill, t1, 600);
    assert_eq!(treadmill.distance_km(), before);
}

#[test]
fn test_resume_applies_no_backlog() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    let t1 = run_for(&mut treadmill, t0, 10);
    treadmill.toggle_running(t1);

    // Paused for ten minutes without any polling at all
    let t2 = t1 + secs(600);
    treadmill.toggle_running(t2);
    assert!(treadmill.is_running());
    treadmill.update(t2 + secs(1));

    let expected = MPH_TO_KMH * 11.0 / 3600.0;
    assert!((treadmill.distance_km() - expected).abs() < EPSILON);
}

#[test]
fn test_auto_resume_reanchors() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    treadmill.decrease_speed(t0);
    assert!(!treadmill.is_running());

    let t1 = t0 + secs(300);
    treadmill.increase_speed(t1);
    assert!(treadmill.is_running());
    treadmill.update(t1 + secs(1));

    let expected = 1.0 * MPH_TO_KMH / 3600.0;
    assert!((treadmill.distance_km() - expected).abs() < EPSILON);
}

// ==================== Speed Range Tests ====================

#[test]
fn test_speed_always_in_range() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    let inputs = [-10.0, 0.05, 2.96, 3.04, 100.0, f32::INFINITY, 1.5];
    for (i, &value) in inputs.iter().enumerate() {
        let now = t0 + secs(i as u64);
        treadmill.set_speed(value, now);
        assert!((0.0..=3.0).contains(&treadmill.speed()), "slider gave {}", treadmill.speed());
        for _ in 0..8 {
            treadmill.increase_speed(now);
            assert!(treadmill.speed() <= 3.0);
        }
        for _ in 0..8 {
            treadmill.decrease_speed(now);
            assert!(treadmill.speed() >= 0.0);
        }
    }
}

#[test]
fn test_decrease_from_half_to_zero_pauses() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    treadmill.set_speed(0.5, t0);
    assert!(treadmill.is_running());
    treadmill.decrease_speed(t0);
    assert_eq!(treadmill.speed(), 0.0);
    assert!(!treadmill.is_running());
}

#[test]
fn test_increase_from_zero_resumes() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    treadmill.set_speed(0.0, t0);
    treadmill.increase_speed(t0);
    assert!(treadmill.is_running());
    assert_eq!(treadmill.speed(), 0.5);
}

#[test]
fn test_custom_thresholds() {
    let settings = TreadmillSettings {
        auto_pause_threshold: 1.0,
        resume_speed: 2.0,
        ..TreadmillSettings::default()
    };
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(settings, t0);
    treadmill.increase_speed(t0);
    treadmill.decrease_speed(t0);
    assert_eq!(treadmill.speed(), 1.0);
    assert!(!treadmill.is_running());

    treadmill.set_speed(0.0, t0);
    treadmill.toggle_running(t0);
    assert_eq!(treadmill.speed(), 2.0);
}

// ==================== Reset Tests ====================

#[test]
fn test_reset_restarts_measurement() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    let t1 = run_for(&mut treadmill, t0, 30);
    assert!(treadmill.distance_km() > 0.0);

    treadmill.reset(t1);
    assert_eq!(treadmill.distance_km(), 0.0);
    assert_eq!(treadmill.elapsed(t1), Duration::ZERO);

    treadmill.update(t1 + secs(1));
    let expected = MPH_TO_KMH / 3600.0;
    assert!((treadmill.distance_km() - expected).abs() < EPSILON);
    assert_eq!(treadmill.elapsed(t1 + secs(1)), secs(1));
}

#[test]
fn test_elapsed_counts_while_paused() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    treadmill.toggle_running(t0);
    assert_eq!(treadmill.elapsed(t0 + secs(90)), secs(90));
}

// ==================== Panel Tests ====================

fn assert_in_bounds(panel: &ControlPanel) {
    let p = panel.position();
    let max = panel.viewport() - panel.footprint();
    assert!(p.x >= 0.0 && p.y >= 0.0, "negative position {:?}", p);
    if max.x >= 0.0 {
        assert!(p.x <= max.x, "x {} beyond {}", p.x, max.x);
    }
    if max.y >= 0.0 {
        assert!(p.y <= max.y, "y {} beyond {}", p.y, max.y);
    }
}

#[test]
fn test_minimized_resize_recomputes_corner() {
    let mut panel = ControlPanel::new(PanelLayout::default(), Vec2::new(800.0, 600.0));
    assert!(panel.is_minimized());
    assert_eq!(panel.position(), Vec2::new(760.0, 560.0));

    panel.resize(Vec2::new(400.0, 300.0));
    assert_eq!(panel.position(), Vec2::new(360.0, 260.0));
}

#[test]
fn test_panel_stays_in_bounds() {
    let mut panel = ControlPanel::new(PanelLayout::default(), Vec2::new(800.0, 600.0));
    let pointers = [
        Vec2::new(-500.0, -500.0),
        Vec2::new(5000.0, 5000.0),
        Vec2::new(400.0, 300.0),
        Vec2::new(799.0, 0.0),
    ];
    let viewports = [Vec2::new(1024.0, 768.0), Vec2::new(320.0, 240.0), Vec2::new(800.0, 600.0)];

    for &viewport in &viewports {
        for minimized_round in 0..2 {
            if minimized_round == 1 {
                panel.toggle_minimized();
            }
            panel.begin_drag(panel.position() + Vec2::new(5.0, 5.0));
            for &pointer in &pointers {
                panel.drag_to(pointer);
                assert_in_bounds(&panel);
            }
            panel.resize(viewport);
            assert_in_bounds(&panel);
            assert_eq!(panel.end_drag(), Some(DragOutcome::Moved));
            assert_in_bounds(&panel);
        }
    }
}

#[test]
fn test_dragged_panel_returns_to_corner_on_resize() {
    let mut panel = ControlPanel::new(PanelLayout::default(), Vec2::new(800.0, 600.0));
    panel.begin_drag(panel.position());
    panel.drag_to(Vec2::new(100.0, 100.0));
    panel.end_drag();
    panel.resize(Vec2::new(1000.0, 700.0));
    assert_eq!(panel.position(), Vec2::new(960.0, 660.0));
}

// ==================== Animation Tests ====================

#[test]
fn test_animation_follows_treadmill_state() {
    let t0 = Instant::now();
    let mut treadmill = Treadmill::new(TreadmillSettings::default(), t0);
    let mut anim = SceneAnimation::default();

    anim.tick(0.5, treadmill.status());
    let moved = anim.props()[0];
    assert!(moved.bounce > 0.0);

    treadmill.toggle_running(t0);
    anim.tick(0.5, treadmill.status());
    assert_eq!(anim.props()[0], moved);
}
