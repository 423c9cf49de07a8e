//! Control panel placement
//!
//! The panel floats over the scene in logical pixels. Its footprint depends on
//! whether it is minimized, and its top-left position is always clamped so the
//! whole footprint stays inside the viewport. Dragging starts on the handle and
//! a press-release without movement is reported as a click, which the caller
//! uses to toggle the minimized state.

use serde::{Serialize, Deserialize};
use sushirun_math::Vec2;

/// Panel sizes and margins, all in logical pixels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLayout {
    /// Footprint when collapsed to the handle button
    pub minimized_size: [f32; 2],
    /// Footprint when showing the speed controls
    pub expanded_size: [f32; 2],
    /// Default corner offset from the bottom-right when minimized
    pub minimized_offset: [f32; 2],
    /// Default corner offset from the bottom-right when expanded
    pub expanded_offset: [f32; 2],
    /// Height of the draggable header strip of the expanded panel
    pub handle_height: f32,
    /// Pointer travel below which a press-release counts as a click
    pub click_slop: f32,
    /// Whether the panel starts collapsed
    pub start_minimized: bool,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            minimized_size: [40.0, 40.0],
            expanded_size: [280.0, 180.0],
            minimized_offset: [40.0, 40.0],
            expanded_offset: [300.0, 200.0],
            handle_height: 36.0,
            click_slop: 3.0,
            start_minimized: true,
        }
    }
}

impl PanelLayout {
    /// Replace unusable sizes and margins with defaults, logging each fix
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.minimized_size.iter().all(|v| v.is_finite() && *v > 0.0) {
            log::warn!("panel.minimized_size must be positive and finite, using {:?}", defaults.minimized_size);
            self.minimized_size = defaults.minimized_size;
        }
        if !self.expanded_size.iter().all(|v| v.is_finite() && *v > 0.0) {
            log::warn!("panel.expanded_size must be positive and finite, using {:?}", defaults.expanded_size);
            self.expanded_size = defaults.expanded_size;
        }
        if !self.minimized_offset.iter().all(|v| v.is_finite()) {
            log::warn!("panel.minimized_offset must be finite, using {:?}", defaults.minimized_offset);
            self.minimized_offset = defaults.minimized_offset;
        }
        if !self.expanded_offset.iter().all(|v| v.is_finite()) {
            log::warn!("panel.expanded_offset must be finite, using {:?}", defaults.expanded_offset);
            self.expanded_offset = defaults.expanded_offset;
        }
        if !(self.handle_height.is_finite() && self.handle_height >= 0.0) {
            log::warn!("panel.handle_height must be non-negative and finite, using {}", defaults.handle_height);
            self.handle_height = defaults.handle_height;
        }
        if !(self.click_slop.is_finite() && self.click_slop >= 0.0) {
            log::warn!("panel.click_slop must be non-negative and finite, using {}", defaults.click_slop);
            self.click_slop = defaults.click_slop;
        }
        self
    }
}

/// How a drag ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    /// Pointer barely moved
    Click,
    /// Panel was repositioned
    Moved,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    grab_offset: Vec2,
    origin: Vec2,
    travelled: f32,
}

/// Floating control panel state
#[derive(Clone, Debug)]
pub struct ControlPanel {
    layout: PanelLayout,
    viewport: Vec2,
    position: Vec2,
    minimized: bool,
    drag: Option<Drag>,
}

impl ControlPanel {
    /// Create a panel in its default corner
    pub fn new(layout: PanelLayout, viewport: Vec2) -> Self {
        let layout = layout.sanitized();
        let minimized = layout.start_minimized;
        let mut panel = Self {
            layout,
            viewport,
            position: Vec2::ZERO,
            minimized,
            drag: None,
        };
        panel.position = panel.default_corner();
        panel
    }

    /// Current width and height
    pub fn footprint(&self) -> Vec2 {
        if self.minimized {
            self.layout.minimized_size.into()
        } else {
            self.layout.expanded_size.into()
        }
    }

    fn offset(&self) -> Vec2 {
        if self.minimized {
            self.layout.minimized_offset.into()
        } else {
            self.layout.expanded_offset.into()
        }
    }

    /// Largest allowed top-left position
    fn max_position(&self) -> Vec2 {
        self.viewport - self.footprint()
    }

    /// Clamp a top-left position so the footprint fits in the viewport
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp_components(Vec2::ZERO, self.max_position())
    }

    /// Viewport size minus the corner offset for the current footprint, clamped
    pub fn default_corner(&self) -> Vec2 {
        self.clamp(self.viewport - self.offset())
    }

    /// Collapse or expand; the panel jumps to the new default corner
    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
        self.drag = None;
        self.position = self.default_corner();
        log::info!("Control panel {}", if self.minimized { "minimized" } else { "expanded" });
    }

    /// React to a viewport size change
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.position = if self.drag.is_some() {
            self.clamp(self.position)
        } else {
            self.default_corner()
        };
    }

    /// Start a mouse drag; the grab point keeps its offset within the panel
    pub fn begin_drag(&mut self, pointer: Vec2) {
        self.drag = Some(Drag {
            grab_offset: pointer - self.position,
            origin: pointer,
            travelled: 0.0,
        });
    }

    /// Start a touch drag; the panel's corner snaps to the touch point
    pub fn begin_touch_drag(&mut self, point: Vec2) {
        self.position = self.clamp(point);
        self.drag = Some(Drag {
            grab_offset: Vec2::ZERO,
            origin: point,
            travelled: 0.0,
        });
    }

    /// Move the panel with the pointer; ignored when no drag is active
    pub fn drag_to(&mut self, pointer: Vec2) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.travelled = drag.travelled.max(pointer.distance(drag.origin));
        let target = pointer - drag.grab_offset;
        self.position = self.clamp(target);
    }

    /// Finish the drag, or None when no drag was active
    pub fn end_drag(&mut self) -> Option<DragOutcome> {
        let drag = self.drag.take()?;
        if drag.travelled <= self.layout.click_slop {
            Some(DragOutcome::Click)
        } else {
            log::debug!("Control panel moved to ({:.0}, {:.0})", self.position.x, self.position.y);
            Some(DragOutcome::Moved)
        }
    }

    /// Abandon an active drag without reporting a click
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Whether `p` lies within the panel footprint
    pub fn contains(&self, p: Vec2) -> bool {
        let size = self.footprint();
        p.x >= self.position.x
            && p.y >= self.position.y
            && p.x <= self.position.x + size.x
            && p.y <= self.position.y + size.y
    }

    /// Whether `p` lies on the part of the panel that starts a drag
    ///
    /// The minimized panel is all handle; the expanded panel drags by its header.
    pub fn drag_handle_contains(&self, p: Vec2) -> bool {
        if !self.contains(p) {
            return false;
        }
        self.minimized || p.y <= self.position.y + self.layout.handle_height
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }
}
