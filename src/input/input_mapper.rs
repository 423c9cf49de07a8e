//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard shortcuts to the same actions the control panel buttons
//! produce, so both paths go through one dispatcher.
//! Pointer drags are NOT mapped here - they go to the panel and OrbitController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions that change run, panel or view state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Start or pause the run (Space)
    ToggleRunning,
    /// Step the speed up (Up, +)
    IncreaseSpeed,
    /// Step the speed down (Down, -)
    DecreaseSpeed,
    /// Set the speed directly (slider)
    SetSpeed(f32),
    /// Zero distance and elapsed time (R key)
    ResetDistance,
    /// Collapse or expand the control panel (M key)
    TogglePanel,
    /// Toggle camera auto-rotation (T key)
    ToggleAutoRotate,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Exit application (Escape)
    Exit,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for shortcut keys on press, `None` otherwise
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Space => Some(InputAction::ToggleRunning),
            KeyCode::ArrowUp | KeyCode::Equal | KeyCode::NumpadAdd => Some(InputAction::IncreaseSpeed),
            KeyCode::ArrowDown | KeyCode::Minus | KeyCode::NumpadSubtract => Some(InputAction::DecreaseSpeed),
            KeyCode::KeyR => Some(InputAction::ResetDistance),
            KeyCode::KeyM => Some(InputAction::TogglePanel),
            KeyCode::KeyT => Some(InputAction::ToggleAutoRotate),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Escape => Some(InputAction::Exit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_speed_keys() {
        for key in [KeyCode::ArrowUp, KeyCode::Equal, KeyCode::NumpadAdd] {
            assert_eq!(
                InputMapper::map_keyboard(key, ElementState::Pressed),
                Some(InputAction::IncreaseSpeed),
                "Key {:?} should increase speed",
                key
            );
        }
        for key in [KeyCode::ArrowDown, KeyCode::Minus, KeyCode::NumpadSubtract] {
            assert_eq!(
                InputMapper::map_keyboard(key, ElementState::Pressed),
                Some(InputAction::DecreaseSpeed),
                "Key {:?} should decrease speed",
                key
            );
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Space, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_unmapped_keys() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Space, ElementState::Pressed),
            Some(InputAction::ToggleRunning)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Pressed),
            Some(InputAction::ResetDistance)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyM, ElementState::Pressed),
            Some(InputAction::TogglePanel)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyT, ElementState::Pressed),
            Some(InputAction::ToggleAutoRotate)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
    }
}
