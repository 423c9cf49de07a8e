//! Run session
//!
//! Owns the treadmill and the control panel and is the one place where
//! actions from keys, overlay buttons and pointer gestures change them.

use std::time::Instant;
use sushirun_core::{ControlPanel, DragOutcome, Treadmill};
use sushirun_math::Vec2;
use crate::config::AppConfig;
use crate::input::InputAction;

/// Treadmill and panel state for one app session
pub struct RunSession {
    pub treadmill: Treadmill,
    pub panel: ControlPanel,
    /// Finger that owns the current panel drag
    touch: Option<u64>,
}

impl RunSession {
    /// Start a session for a viewport of `viewport` logical pixels
    pub fn new(config: &AppConfig, viewport: Vec2, now: Instant) -> Self {
        Self {
            treadmill: Treadmill::new(config.treadmill.clone(), now),
            panel: ControlPanel::new(config.panel.clone(), viewport),
            touch: None,
        }
    }

    /// Apply a run or panel action
    ///
    /// Returns false for actions that belong to the view or window
    /// (auto-rotate, fullscreen, exit) so the caller can handle them.
    pub fn apply(&mut self, action: InputAction, now: Instant) -> bool {
        match action {
            InputAction::ToggleRunning => self.treadmill.toggle_running(now),
            InputAction::IncreaseSpeed => self.treadmill.increase_speed(now),
            InputAction::DecreaseSpeed => self.treadmill.decrease_speed(now),
            InputAction::SetSpeed(value) => self.treadmill.set_speed(value, now),
            InputAction::ResetDistance => self.treadmill.reset(now),
            InputAction::TogglePanel => self.panel.toggle_minimized(),
            InputAction::ToggleAutoRotate | InputAction::ToggleFullscreen | InputAction::Exit => {
                return false;
            }
        }
        true
    }

    /// Mouse press at `pointer` (logical pixels)
    ///
    /// Returns true when the press grabbed the panel.
    pub fn pointer_pressed(&mut self, pointer: Vec2) -> bool {
        if self.panel.is_dragging() || !self.panel.drag_handle_contains(pointer) {
            return false;
        }
        self.panel.begin_drag(pointer);
        true
    }

    /// Mouse moved; ignored while a finger owns the drag
    pub fn pointer_moved(&mut self, pointer: Vec2) {
        if self.touch.is_none() {
            self.panel.drag_to(pointer);
        }
    }

    /// Mouse released; ignored while a finger owns the drag
    pub fn pointer_released(&mut self) -> Option<DragOutcome> {
        if self.touch.is_some() {
            return None;
        }
        self.finish_drag()
    }

    /// Touch `id` started at `point`; anywhere on the panel grabs it
    pub fn touch_started(&mut self, id: u64, point: Vec2) -> bool {
        if self.panel.is_dragging() || !self.panel.contains(point) {
            return false;
        }
        self.panel.begin_touch_drag(point);
        self.touch = Some(id);
        true
    }

    /// Touch `id` moved; other fingers are ignored
    pub fn touch_moved(&mut self, id: u64, point: Vec2) {
        if self.touch == Some(id) {
            self.panel.drag_to(point);
        }
    }

    /// Touch `id` lifted or cancelled; only the grabbing finger ends the drag
    pub fn touch_ended(&mut self, id: u64) -> Option<DragOutcome> {
        if self.touch != Some(id) {
            return None;
        }
        self.touch = None;
        self.finish_drag()
    }

    /// Drop any drag without reporting a click (focus loss)
    pub fn cancel_drag(&mut self) {
        self.touch = None;
        self.panel.cancel_drag();
    }

    /// A click on the minimized panel expands it. The expanded panel has its
    /// own collapse button, so a click on its header does nothing.
    fn finish_drag(&mut self) -> Option<DragOutcome> {
        let outcome = self.panel.end_drag()?;
        if outcome == DragOutcome::Click && self.panel.is_minimized() {
            self.panel.toggle_minimized();
        }
        Some(outcome)
    }

    /// Viewport resized (logical pixels)
    pub fn resize(&mut self, viewport: Vec2) {
        self.panel.resize(viewport);
    }
}
