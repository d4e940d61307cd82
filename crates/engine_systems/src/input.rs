//! Input subsystem.
//!
//! Keeps held key/button state plus edge-triggered just-pressed and
//! just-released sets. [`InputSystem::update`] runs once per frame before
//! gameplay and clears the edge sets, so an edge flag is observable for
//! exactly the frame its transition happened on. Events are fed in by the
//! platform layer via the `on_*` methods.

use std::collections::HashSet;

use engine_math::Vec2;

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    Space, Enter, Escape, Tab, Backspace, Delete,
    Left, Right, Up, Down,
    LeftShift, RightShift, LeftCtrl, RightCtrl, LeftAlt, RightAlt,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard and mouse state with per-frame edge detection.
#[derive(Debug, Default)]
pub struct InputSystem {
    held: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
    just_released: HashSet<KeyCode>,
    mouse_held: HashSet<MouseButton>,
    mouse_position: Vec2,
    last_mouse_position: Vec2,
    mouse_delta: Vec2,
}

impl InputSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame: clear edge state and recompute the mouse delta.
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();

        self.mouse_delta = self.mouse_position - self.last_mouse_position;
        self.last_mouse_position = self.mouse_position;
    }

    /// Whether the key is currently held.
    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Whether the key went down this frame.
    #[must_use]
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Whether the key went up this frame.
    #[must_use]
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.just_released.contains(&key)
    }

    #[must_use]
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Mouse movement since the previous frame.
    #[must_use]
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Feed a key transition from the platform layer.
    pub fn on_key_event(&mut self, key: KeyCode, pressed: bool) {
        let was_pressed = self.held.contains(&key);
        if pressed {
            self.held.insert(key);
            if !was_pressed {
                self.just_pressed.insert(key);
            }
        } else {
            self.held.remove(&key);
            if was_pressed {
                self.just_released.insert(key);
            }
        }
    }

    /// Feed a mouse button transition from the platform layer.
    pub fn on_mouse_button_event(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_held.insert(button);
        } else {
            self.mouse_held.remove(&button);
        }
    }

    /// Feed an absolute mouse position from the platform layer.
    pub fn on_mouse_move(&mut self, x: f32, y: f32) {
        self.mouse_position = Vec2::new(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_just_pressed_lasts_one_frame() {
        let mut input = InputSystem::new();
        input.on_key_event(KeyCode::Space, true);
        assert!(input.is_key_pressed(KeyCode::Space));
        assert!(input.is_key_just_pressed(KeyCode::Space));

        input.update();
        assert!(input.is_key_pressed(KeyCode::Space));
        assert!(!input.is_key_just_pressed(KeyCode::Space));
    }

    #[test]
    fn test_just_released_lasts_one_frame() {
        let mut input = InputSystem::new();
        input.on_key_event(KeyCode::W, true);
        input.update();
        input.on_key_event(KeyCode::W, false);
        assert!(!input.is_key_pressed(KeyCode::W));
        assert!(input.is_key_just_released(KeyCode::W));

        input.update();
        assert!(!input.is_key_just_released(KeyCode::W));
    }

    #[test]
    fn test_repeat_press_is_not_an_edge() {
        let mut input = InputSystem::new();
        input.on_key_event(KeyCode::A, true);
        input.update();
        // Key repeat from the platform: still held, no new edge.
        input.on_key_event(KeyCode::A, true);
        assert!(!input.is_key_just_pressed(KeyCode::A));
    }

    #[test]
    fn test_mouse_delta_between_frames() {
        let mut input = InputSystem::new();
        input.on_mouse_move(10.0, 20.0);
        input.update();
        input.on_mouse_move(13.0, 18.0);
        input.update();
        assert_eq!(input.mouse_delta(), Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_mouse_buttons() {
        let mut input = InputSystem::new();
        input.on_mouse_button_event(MouseButton::Left, true);
        assert!(input.is_mouse_button_pressed(MouseButton::Left));
        input.on_mouse_button_event(MouseButton::Left, false);
        assert!(!input.is_mouse_button_pressed(MouseButton::Left));
    }
}
